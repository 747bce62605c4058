//! Module for book API endpoints.

pub mod handlers;
pub mod routes;
