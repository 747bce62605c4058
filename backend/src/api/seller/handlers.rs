//! Handler functions for seller API endpoints.
//!
//! These functions extract path and body data, delegate to `SellerService`
//! and translate its errors with `service_error_to_http`.

use crate::api::common::service_error_to_http;
use crate::database::models::{
    IncomingSeller, ReturnedAllSellers, ReturnedSeller, ReturnedSellerWithBooks, UpdateSeller,
};
use crate::services::seller_service::SellerService;
use crate::utils::password::CredentialStore;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Registers a new seller.
#[axum::debug_handler]
pub async fn create_seller(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialStore>,
    Json(payload): Json<IncomingSeller>,
) -> Result<(StatusCode, ResponseJson<ReturnedSeller>), (StatusCode, String)> {
    let service = SellerService::new(&pool, credentials);

    match service.register_seller(payload).await {
        Ok(seller) => Ok((StatusCode::CREATED, ResponseJson(seller))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Lists every seller.
#[axum::debug_handler]
pub async fn list_sellers(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialStore>,
) -> Result<ResponseJson<ReturnedAllSellers>, (StatusCode, String)> {
    let service = SellerService::new(&pool, credentials);

    service
        .list_sellers()
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}

/// Retrieves a seller with their books.
#[axum::debug_handler]
pub async fn get_seller(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialStore>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<ReturnedSellerWithBooks>, (StatusCode, String)> {
    let service = SellerService::new(&pool, credentials);

    service
        .get_seller_with_books(id)
        .await
        .map(ResponseJson)
        .map_err(|e| {
            tracing::info!("Seller lookup for ID {} failed: {}", id, e);
            service_error_to_http(e)
        })
}

/// Deletes a seller. Always answers 204, whether or not the seller existed.
#[axum::debug_handler]
pub async fn delete_seller(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let service = SellerService::new(&pool, credentials);

    match service.delete_seller(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Updates a seller's names and e-mail.
#[axum::debug_handler]
pub async fn update_seller(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialStore>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSeller>,
) -> Result<ResponseJson<ReturnedSeller>, (StatusCode, String)> {
    let service = SellerService::new(&pool, credentials);

    match service.update_seller(id, payload).await {
        Ok(seller) => Ok(ResponseJson(seller)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
