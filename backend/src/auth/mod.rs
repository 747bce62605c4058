//! Authentication module for seller login and token-based access control.
//!
//! This module provides the token endpoint, the login service behind it and
//! the middleware guarding protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
