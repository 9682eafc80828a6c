//! Configuration loader for the `paddysense` backend service.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). By consolidating configuration logic
//! here, we avoid scattering `env::var` calls throughout the codebase.

use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional typed environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// PostgreSQL connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// Disease inference service endpoint.
    pub classifier_url: String,

    /// TCP port the HTTP server binds.
    pub bind_port: u16,

    /// Result count for readings queries that do not pass `limit`.
    pub readings_default_limit: u32,

    /// Hard cap on readings returned per query, whatever `limit` says.
    pub readings_max_limit: u32,

    /// Soil-moisture floor (percent) reported alongside readings.
    pub moisture_min: f64,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DATABASE_URL` – PostgreSQL connection string
/// - `CLASSIFIER_URL` – disease inference service endpoint
///
/// Optional:
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `BIND_PORT` – HTTP listen port (default: 8080)
/// - `READINGS_DEFAULT_LIMIT` – default query size (default: 100)
/// - `READINGS_MAX_LIMIT` – query size hard cap (default: 1000)
/// - `MOISTURE_MIN` – watering threshold percent (default: 35)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let db_url = require_env!("DATABASE_URL");
    let classifier_url = require_env!("CLASSIFIER_URL");
    let db_pool_max = parse_env!("DB_POOL_MAX", u32, 5);
    let bind_port = parse_env!("BIND_PORT", u16, 8080);
    let readings_default_limit = parse_env!("READINGS_DEFAULT_LIMIT", u32, 100);
    let readings_max_limit = parse_env!("READINGS_MAX_LIMIT", u32, 1000);
    let moisture_min = parse_env!("MOISTURE_MIN", f64, crate::nutrients::DEFAULT_MOISTURE_MIN);

    Ok(Config {
        db_url,
        db_pool_max,
        classifier_url,
        bind_port,
        readings_default_limit,
        readings_max_limit,
        moisture_min,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks sensitive information like database passwords while showing
    /// all configuration values that were loaded.
    pub fn log_config(&self) {
        // ---
        // Mask the password in the database URL for security
        let masked_db_url = if let Some(at_pos) = self.db_url.rfind('@') {
            if let Some(colon_pos) = self.db_url[..at_pos].rfind(':') {
                format!(
                    "{}:****{}",
                    &self.db_url[..colon_pos],
                    &self.db_url[at_pos..]
                )
            } else {
                self.db_url.clone()
            }
        } else {
            self.db_url.clone()
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL           : {}", masked_db_url);
        tracing::info!("  CLASSIFIER_URL         : {}", self.classifier_url);
        tracing::info!("  DB_POOL_MAX            : {}", self.db_pool_max);
        tracing::info!("  BIND_PORT              : {}", self.bind_port);
        tracing::info!("  READINGS_DEFAULT_LIMIT : {}", self.readings_default_limit);
        tracing::info!("  READINGS_MAX_LIMIT     : {}", self.readings_max_limit);
        tracing::info!("  MOISTURE_MIN           : {}", self.moisture_min);
    }
}
