//! Main entry point for the bookstore backend.
//!
//! This file initializes logging, loads configuration, opens the database
//! (applying migrations) and serves the API router with Axum.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::{Context, Result};
use config::Config;
use database::Database;
use tracing::info;
use utils::jwt::TokenService;
use utils::password::CredentialStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;

    let tokens = TokenService::new(&config.jwt_secret, config.jwt_expires_in_seconds);
    let credentials = CredentialStore::new(config.bcrypt_cost);

    let app = api::router(db.pool().clone(), tokens, credentials);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting bookstore server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
