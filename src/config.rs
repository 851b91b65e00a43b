//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::{CODES_TTL_MS, RATES_TTL_MS};

/// Default upstream provider; answers `GET {url}/{CODE}` with `{"rates": {...}}`.
pub const DEFAULT_EXCHANGE_RATE_BASE_URL: &str = "https://open.er-api.com/v6/latest";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the exchange-rate provider
    pub exchange_rate_base_url: String,
    /// Location of the SQLite database file
    pub database_path: String,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum age of a cached rate table in milliseconds
    pub rates_ttl_ms: i64,
    /// Maximum age of the cached code list in milliseconds
    pub codes_ttl_ms: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `EXCHANGE_RATE_BASE_URL` - Upstream base URL (default: open.er-api.com)
    /// - `DATABASE_PATH` - SQLite file location (default: currency.db)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RATES_TTL_MS` - Rate table TTL (default: 12 hours)
    /// - `CODES_TTL_MS` - Code list TTL (default: 7 days)
    ///
    /// Unparseable values fall back to the default, as do TTLs that are not positive.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            exchange_rate_base_url: env::var("EXCHANGE_RATE_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.exchange_rate_base_url),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.database_path),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            rates_ttl_ms: env::var("RATES_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.rates_ttl_ms),
            codes_ttl_ms: env::var("CODES_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.codes_ttl_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_rate_base_url: DEFAULT_EXCHANGE_RATE_BASE_URL.to_string(),
            database_path: "currency.db".to_string(),
            server_port: 3000,
            rates_ttl_ms: RATES_TTL_MS,
            codes_ttl_ms: CODES_TTL_MS,
        }
    }
}
