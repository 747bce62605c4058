//! Central module for application-wide configuration settings.
//!
//! This module handles loading the database URL, pool sizing, token signing
//! parameters, password hashing cost and server port from the environment.

use anyhow::{Context, Result};
use std::env;

/// Longest token lifetime accepted from the environment (ten years).
pub const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_seconds = parse_jwt_expires_in(
            &env::var("JWT_EXPIRES_IN_SECONDS").unwrap_or_else(|_| "86400".to_string()),
        )?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
        })
    }
}

fn parse_jwt_expires_in(raw: &str) -> Result<u64> {
    let seconds = raw
        .trim()
        .parse::<u64>()
        .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

    if seconds == 0 || seconds > MAX_JWT_EXPIRES_IN_SECONDS {
        anyhow::bail!(
            "JWT_EXPIRES_IN_SECONDS must be between 1 and {}",
            MAX_JWT_EXPIRES_IN_SECONDS
        );
    }

    Ok(seconds)
}
