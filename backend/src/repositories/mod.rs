//! Data-access layer.
//!
//! Each repository borrows the shared SQLite pool and exposes the queries for
//! one table.

pub mod book_repository;
pub mod seller_repository;
