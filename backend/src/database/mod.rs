//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the database connection pool,
//! applying the schema migrations and providing a central point for
//! database-related configurations and helpers.

use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use std::time::Duration;

pub mod models;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Initializes the database connection pool and runs pending migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        // Foreign keys must be on for every pooled connection, otherwise the
        // books cascade silently stops working.
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("Invalid DATABASE_URL: {}", config.database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        let db = Database { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed.");
    }
}

/// Fresh in-memory database with the schema applied.
///
/// The pool is pinned to a single connection that never expires, since every
/// SQLite in-memory connection is its own database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory database");

    let db = Database { pool };
    db.migrate().await.expect("migrations apply");
    db.pool
}
