//! Seller credential hashing and verification.
//!
//! Passwords are stored as bcrypt hashes with a per-record salt. The only way
//! to compare a submitted password against a stored one is [`CredentialStore::verify`].
//!
//! bcrypt only reads the first 72 bytes of its input, including a trailing
//! NUL. The non-truncating variants are used so longer passwords are refused
//! instead of silently shortened. Hashing runs on the blocking thread pool.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{non_truncating_hash, non_truncating_verify};
use tokio::task;

/// Longest password bcrypt can hash without truncating it.
pub const MAX_PASSWORD_BYTES: usize = 71;

#[derive(Debug, Clone, Copy)]
pub struct CredentialStore {
    cost: u32,
}

impl CredentialStore {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Function to hash a password before storing in database
    ///
    /// # Arguments
    /// * `password` - Plain text password to hash
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// Returns `ServiceError` if hashing fails or the password is longer
    /// than [`MAX_PASSWORD_BYTES`]
    pub async fn hash(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_owned();
        let cost = self.cost;

        task::spawn_blocking(move || non_truncating_hash(password, cost))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Checks a submitted password against the stored hash.
    ///
    /// A stored value that is not a bcrypt hash counts as a mismatch, and so
    /// does a password too long to hash without truncation.
    pub async fn verify(&self, password: &str, password_hash: &str) -> bool {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        match task::spawn_blocking(move || non_truncating_verify(password, &password_hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::warn!("Password verification failed: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Spends the same bcrypt work as [`CredentialStore::verify`] for a
    /// seller that does not exist, and always reports a mismatch.
    pub async fn reject(&self, password: &str) -> bool {
        let password = password.to_owned();
        let cost = self.cost;

        if let Err(e) = task::spawn_blocking(move || non_truncating_hash(password, cost)).await {
            tracing::error!("Password verification task failed: {}", e);
        }
        false
    }
}
