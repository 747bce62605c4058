//! Error handling utilities for API responses.
//!
//! Provides the structured error envelope and the conversion from
//! service-layer errors to HTTP responses.
//!
//! # Response Format
//! All errors return consistent JSON bodies containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//! - `error.details`: Optional field-specific validation errors
//!
//! Successful responses are the bare resource shapes, without an envelope.

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard error body for every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Human-readable message
    pub message: String,
    pub error: ErrorDetails,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-specific validation error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

impl ErrorResponse {
    pub fn new(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: ErrorDetails {
                error_type: error_type.into(),
                details,
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn into_http(self, status: StatusCode) -> (StatusCode, String) {
        // Serializing plain strings and vectors of them cannot fail.
        let body = serde_json::to_string(&self).unwrap_or_else(|_| self.message.clone());
        (status, body)
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message, details) = match error {
        ServiceError::InvalidInput(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Validation failed".to_string(),
            Some(validation_errors_to_field_errors(errors)),
        ),
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
            None,
        ),
        ServiceError::AlreadyExists { entity, identifier } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} '{}' already exists", entity, identifier),
            None,
        ),
        ServiceError::Unauthorized { message } => {
            (StatusCode::UNAUTHORIZED, "unauthorized", message, None)
        }
        ServiceError::MissingToken => (
            StatusCode::UNAUTHORIZED,
            "missing_token",
            "No token provided".to_string(),
            None,
        ),
        ServiceError::InvalidToken { message } => {
            tracing::debug!("Invalid token: {}", message);
            (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Could not validate credentials".to_string(),
                None,
            )
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
                None,
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            )
        }
    };

    ErrorResponse::new(message, error_type, details).into_http(status)
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .unwrap_or(&"Invalid value".into())
                    .to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}
