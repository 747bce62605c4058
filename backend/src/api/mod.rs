//! Central module for organizing the application's API endpoints.
//!
//! `router` assembles the seller, book and token routes under `/api/v1` and
//! attaches the shared state as extensions.

pub mod book;
pub mod common;
pub mod seller;

use crate::auth::routes::token_router;
use crate::utils::jwt::TokenService;
use crate::utils::password::CredentialStore;
use axum::{Extension, Router};
use sqlx::SqlitePool;

pub fn router(pool: SqlitePool, tokens: TokenService, credentials: CredentialStore) -> Router {
    let v1 = Router::new()
        .merge(seller::routes::seller_router())
        .merge(book::routes::book_router())
        .merge(token_router());

    Router::new()
        .nest("/api/v1", v1)
        .layer(Extension(pool))
        .layer(Extension(tokens))
        .layer(Extension(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        tokens: TokenService,
    }

    impl TestApp {
        async fn new() -> Self {
            let tokens = TokenService::new("test-secret", 600);
            let router = router(test_pool().await, tokens.clone(), CredentialStore::new(4));
            Self { router, tokens }
        }

        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            let body = match body {
                Some(json) => {
                    builder = builder.header("content-type", "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };

            let response = self
                .router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();

            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn create_seller(&self, first_name: &str, e_mail: &str) -> Value {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/sellers/",
                    Some(json!({
                        "first_name": first_name,
                        "last_name": "familia",
                        "e_mail": e_mail,
                        "password": "password123"
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body
        }

        async fn token_for(&self, e_mail: &str) -> String {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/token/",
                    Some(json!({"e_mail": e_mail, "password": "password123"})),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body["token"].as_str().unwrap().to_string()
        }

        async fn create_book(&self, seller_id: i64, token: &str) -> Value {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/books/",
                    Some(json!({
                        "title": "Wrong Code",
                        "author": "Robert Martin",
                        "pages": 104,
                        "year": 2007,
                        "seller_id": seller_id,
                        "token": token
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body
        }
    }

    #[tokio::test]
    async fn test_register_then_login_example() {
        let app = TestApp::new().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/sellers/",
                Some(json!({
                    "first_name": "A",
                    "last_name": "B",
                    "e_mail": "a@b.com",
                    "password": "password123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"id": 1, "first_name": "A", "last_name": "B", "e_mail": "a@b.com"})
        );

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/token/",
                Some(json!({"e_mail": "a@b.com", "password": "password123"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let token = body["token"].as_str().unwrap();
        assert_eq!(app.tokens.validate(token).unwrap().e_mail(), "a@b.com");

        let (wrong_status, wrong_password) = app
            .send(
                "POST",
                "/api/v1/token/",
                Some(json!({"e_mail": "a@b.com", "password": "wrong"})),
            )
            .await;
        let (unknown_status, unknown_e_mail) = app
            .send(
                "POST",
                "/api/v1/token/",
                Some(json!({"e_mail": "nobody@b.com", "password": "password123"})),
            )
            .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password["message"], "Incorrect e_mail or password");
        assert_eq!(wrong_password["message"], unknown_e_mail["message"]);
        assert_eq!(wrong_password["error"], unknown_e_mail["error"]);
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = TestApp::new().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/sellers/",
                Some(json!({
                    "first_name": "A",
                    "last_name": "B",
                    "e_mail": "a@b.com",
                    "password": "short"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["error_type"], "validation_error");
        assert_eq!(body["error"]["details"][0]["field"], "password");

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/sellers/",
                Some(json!({
                    "first_name": "A",
                    "last_name": "B",
                    "e_mail": "asdfasdf",
                    "password": "password123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["details"][0]["field"], "e_mail");

        let (_, body) = app.send("GET", "/api/v1/sellers/", None).await;
        assert_eq!(body, json!({"sellers": []}));
    }

    #[tokio::test]
    async fn test_list_sellers_in_creation_order_without_passwords() {
        let app = TestApp::new().await;
        let first = app.create_seller("name", "one@mail.com").await;
        let second = app.create_seller("name_2", "two@mail.com").await;

        let (status, body) = app.send("GET", "/api/v1/sellers/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"sellers": [first, second]}));
        assert!(!body.to_string().contains("password"));
    }

    #[tokio::test]
    async fn test_get_seller_with_books() {
        let app = TestApp::new().await;
        let seller = app.create_seller("name", "a@b.com").await;
        let other = app.create_seller("other", "c@d.com").await;
        let seller_id = seller["id"].as_i64().unwrap();

        let (status, body) = app
            .send("GET", &format!("/api/v1/sellers/{}", seller_id), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["books"], json!([]));

        let token = app.token_for("a@b.com").await;
        let book = app.create_book(seller_id, &token).await;
        app.create_book(other["id"].as_i64().unwrap(), &token).await;

        let (_, body) = app
            .send("GET", &format!("/api/v1/sellers/{}", seller_id), None)
            .await;
        assert_eq!(
            body,
            json!({
                "id": seller_id,
                "first_name": "name",
                "last_name": "familia",
                "e_mail": "a@b.com",
                "books": [book]
            })
        );

        let (status, _) = app.send("GET", "/api/v1/sellers/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_seller_cascades_and_is_idempotent() {
        let app = TestApp::new().await;
        let seller = app.create_seller("name", "a@b.com").await;
        let seller_id = seller["id"].as_i64().unwrap();
        let token = app.token_for("a@b.com").await;
        let book = app.create_book(seller_id, &token).await;

        let uri = format!("/api/v1/sellers/{}", seller_id);
        let (status, body) = app.send("DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, body) = app.send("GET", "/api/v1/sellers/", None).await;
        assert_eq!(body, json!({"sellers": []}));

        let (status, _) = app
            .send("GET", &format!("/api/v1/books/{}", book["id"]), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.send("DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = app.send("DELETE", "/api/v1/sellers/4242", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_seller() {
        let app = TestApp::new().await;
        let seller = app.create_seller("name", "a@b.com").await;
        let seller_id = seller["id"].as_i64().unwrap();
        let uri = format!("/api/v1/sellers/{}", seller_id);

        let (status, body) = app
            .send(
                "PUT",
                &uri,
                Some(json!({
                    "first_name": "shop",
                    "last_name": "SPb",
                    "e_mail": "spb@books.ru",
                    "id": seller_id,
                    "password": "hijacked-password"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": seller_id, "first_name": "shop", "last_name": "SPb", "e_mail": "spb@books.ru"})
        );

        // Password unchanged: the old one still logs in under the new e-mail.
        app.token_for("spb@books.ru").await;
        let (status, _) = app
            .send(
                "POST",
                "/api/v1/token/",
                Some(json!({"e_mail": "spb@books.ru", "password": "hijacked-password"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send("PUT", "/api/v1/sellers/999", Some(json!({"first_name": "x"})))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_e_mail_is_a_conflict() {
        let app = TestApp::new().await;
        app.create_seller("name", "a@b.com").await;
        let other = app.create_seller("other", "c@d.com").await;

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/sellers/",
                Some(json!({
                    "first_name": "again",
                    "last_name": "familia",
                    "e_mail": "a@b.com",
                    "password": "password123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["error_type"], "already_exists");

        let uri = format!("/api/v1/sellers/{}", other["id"]);
        let (status, body) = app
            .send("PUT", &uri, Some(json!({"e_mail": "a@b.com"})))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["error_type"], "already_exists");

        let (_, body) = app.send("GET", &uri, None).await;
        assert_eq!(body["e_mail"], "c@d.com");
        let (_, body) = app.send("GET", "/api/v1/sellers/", None).await;
        assert_eq!(body["sellers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_overlong_password_is_rejected_at_registration() {
        let app = TestApp::new().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/sellers/",
                Some(json!({
                    "first_name": "A",
                    "last_name": "B",
                    "e_mail": "a@b.com",
                    "password": format!("{}correct", "x".repeat(72))
                })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["details"][0]["field"], "password");

        let (status, _) = app
            .send(
                "POST",
                "/api/v1/token/",
                Some(json!({"e_mail": "a@b.com", "password": format!("{}WRONG", "x".repeat(72))})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_route_requires_valid_token() {
        let app = TestApp::new().await;
        let seller = app.create_seller("name", "a@b.com").await;
        let payload = json!({
            "title": "Wrong Code",
            "author": "Robert Martin",
            "pages": 104,
            "year": 2007,
            "seller_id": seller["id"]
        });

        let (status, body) = app.send("POST", "/api/v1/books/", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["error_type"], "missing_token");

        let mut forged = payload.clone();
        forged["token"] = json!(TokenService::new("other-secret", 600).issue("a@b.com").unwrap());
        let (status, body) = app.send("POST", "/api/v1/books/", Some(forged)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["error_type"], "invalid_token");

        let mut missing_seller = payload;
        missing_seller["seller_id"] = json!(999);
        missing_seller["token"] = json!(app.token_for("a@b.com").await);
        let (status, _) = app.send("POST", "/api/v1/books/", Some(missing_seller)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
