//! Defines the HTTP routes for seller management.

use super::handlers::{create_seller, delete_seller, get_seller, list_sellers, update_seller};
use axum::{
    Router,
    routing::{get, post},
};

pub fn seller_router() -> Router {
    Router::new()
        .route("/sellers/", post(create_seller).get(list_sellers))
        .route(
            "/sellers/{id}",
            get(get_seller).put(update_seller).delete(delete_seller),
        )
}
