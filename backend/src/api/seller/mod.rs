//! Module for seller management API endpoints.
//!
//! This module handles registration, listing, lookup with books, updates and
//! deletion of sellers.

pub mod handlers;
pub mod routes;
