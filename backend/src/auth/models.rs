//! Data structures for the token endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "E-mail is required"))]
    pub e_mail: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response carrying the signed token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// The only part of a protected request body the token guard looks at.
#[derive(Debug, Default, Deserialize)]
pub struct TokenEnvelope {
    #[serde(default)]
    pub token: Option<String>,
}
