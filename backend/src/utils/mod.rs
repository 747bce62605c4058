//! Collection of general utility modules.
//!
//! Token signing and password hashing live here since both the auth flow and
//! the seller service depend on them.

pub mod jwt;
pub mod password;
