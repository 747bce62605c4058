//! Defines the HTTP routes for books. Adding a book requires a token.

use super::handlers::{create_book, get_book};
use crate::auth::middleware::require_token;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn book_router() -> Router {
    Router::new()
        .route(
            "/books/",
            post(create_book).layer(middleware::from_fn(require_token)),
        )
        .route("/books/{id}", get(get_book))
}
