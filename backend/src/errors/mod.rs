//! Global application error types.
//!
//! This module defines the error type shared by the service layer. Handlers
//! turn it into HTTP responses through `api::common::service_error_to_http`.

use thiserror::Error;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-level validation failures produced by the `validator` derive.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn not_found(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
