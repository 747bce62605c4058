//! Handler functions for book API endpoints.

use crate::api::common::service_error_to_http;
use crate::database::models::{Book, IncomingBook};
use crate::services::book_service::BookService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Adds a book. Runs behind `require_token`, which supplies the claims.
#[axum::debug_handler]
pub async fn create_book(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<IncomingBook>,
) -> Result<(StatusCode, ResponseJson<Book>), (StatusCode, String)> {
    tracing::info!(
        "Adding book for seller {} on behalf of {}",
        payload.seller_id,
        claims.e_mail()
    );

    match BookService::new(&pool).create_book(payload).await {
        Ok(book) => Ok((StatusCode::CREATED, ResponseJson(book))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves a book by its ID.
#[axum::debug_handler]
pub async fn get_book(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<Book>, (StatusCode, String)> {
    BookService::new(&pool)
        .get_book_required(id)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}
