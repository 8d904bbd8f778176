//! # Configuration Module
//!
//! This module handles loading and validating configuration from
//! environment variables. All settings are centralized here.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! println!("Database: {}", config.database_path);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_PATH` | SQLite database file | `squads.db` |
//! | `DB_MAX_CONNECTIONS` | Connection pool size | `5` |
//! | `SERVER_HOST` | HTTP server host | `0.0.0.0` |
//! | `SERVER_PORT` | HTTP server port | `8080` |
//! | `RUST_LOG` | Log filter directive | `info` |

use std::env;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Failed to parse a value
    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // ==========================================
    // DATABASE SETTINGS
    // ==========================================

    /// Path of the SQLite database file.
    ///
    /// The file is created on first start. A leading `~` is expanded
    /// to the current user's home directory.
    pub database_path: String,

    /// Maximum number of pooled SQLite connections.
    pub db_max_connections: u32,

    // ==========================================
    // SERVER SETTINGS
    // ==========================================

    /// HTTP server host address.
    ///
    /// Use `127.0.0.1` for localhost only, `0.0.0.0` to accept
    /// connections from any interface.
    pub server_host: String,

    /// HTTP server port number.
    ///
    /// Default: 8080
    pub server_port: u16,

    /// Log filter passed to the tracing subscriber.
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Use `dotenvy::dotenv()` before calling this to load from `.env` file.
    ///
    /// ## Returns
    ///
    /// - `Ok(AppConfig)` - Configuration loaded successfully
    /// - `Err(ConfigError)` - A variable has an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_path = get_env_or_default("DATABASE_PATH", "squads.db");
        if raw_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "DATABASE_PATH".to_string(),
                "path must not be empty".to_string(),
            ));
        }

        Ok(Self {
            // Database
            database_path: shellexpand::tilde(&raw_path).into_owned(),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", "5")?,

            // Server
            server_host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
            server_port: parse_env("SERVER_PORT", "8080")?,

            // Logging
            log_filter: get_env_or_default("RUST_LOG", "info"),
        })
    }

    /// Address the HTTP server binds to, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Get an environment variable with a default value.
///
/// Returns the default if the variable is not set.
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable (or its default) and parse it.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError(key.to_string(), format!("{}", e)))
}
