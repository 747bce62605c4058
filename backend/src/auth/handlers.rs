//! Handler functions for the token endpoint.
//!
//! These functions parse the login payload and delegate to `auth::service`
//! for credential checks and token issuance.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::TokenService;
use crate::utils::password::CredentialStore;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle seller login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(tokens): Extension<TokenService>,
    Extension(credentials): Extension<CredentialStore>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, ResponseJson<TokenResponse>), (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &tokens, credentials);

    match auth_service.login(payload).await {
        Ok(response) => Ok((StatusCode::CREATED, ResponseJson(response))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
