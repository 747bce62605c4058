//! Defines the HTTP route for exchanging credentials for a token.

use crate::auth::handlers::login;
use axum::{Router, routing::post};

/// Creates the token router
pub fn token_router() -> Router {
    Router::new().route("/token/", post(login))
}
