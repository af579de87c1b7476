//! Central module for application-wide configuration settings.
//!
//! This module handles loading the database URL, pool sizing, the path to the
//! token signing key, password hashing cost, server port and log destination.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_private_key_path: PathBuf,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_private_key_path = lookup("JWT_PRIVATE_KEY_PATH")
            .map(PathBuf::from)
            .context("JWT_PRIVATE_KEY_PATH not set")?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(value) => value
                .parse::<u32>()
                .context("BCRYPT_COST must be a valid number")?,
            None => bcrypt::DEFAULT_COST,
        };

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let log_file = lookup("LOG_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_private_key_path,
            bcrypt_cost,
            server_port,
            log_file,
        })
    }
}
