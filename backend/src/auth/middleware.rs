//! Middleware for protecting token-guarded routes.
//!
//! The token travels in the JSON body field `token`; an `Authorization: Bearer`
//! header is accepted as well. The guard only rejects: on success the body is
//! handed to the wrapped handler byte for byte, with the decoded `Claims` in
//! the request extensions.

use crate::api::common::service_error_to_http;
use crate::auth::models::TokenEnvelope;
use crate::utils::jwt::TokenService;
use axum::{
    body::{Body, Bytes},
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Upper bound on buffered request bodies.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Token authentication middleware
pub async fn require_token(
    Extension(tokens): Extension<TokenService>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let (parts, body) = request.into_parts();

    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            tracing::warn!("Could not buffer protected request body: {}", e);
            (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            )
        })?;

    let header_token = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_string);

    let token = header_token.or_else(|| body_token(&bytes));

    let claims = tokens
        .authorize(token.as_deref())
        .map_err(service_error_to_http)?;

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn body_token(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice::<TokenEnvelope>(bytes)
        .ok()
        .and_then(|envelope| envelope.token)
}
