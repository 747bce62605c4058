//! Module for core business logic services.
//!
//! Services validate input, orchestrate repository calls and shape the
//! results handed back to the HTTP layer.

pub mod book_service;
pub mod seller_service;
