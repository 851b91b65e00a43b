//! Response DTOs for the converter API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the code list (GET /api/currencies)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyCodesResponse {
    /// Known currency codes
    pub currency_codes: Vec<String>,
    /// When the list was last fetched upstream (Unix milliseconds)
    pub last_updated: i64,
}

/// Response body for a conversion (POST /api/convert)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    /// Rate from the base currency to the target currency
    pub new_currency_rate: f64,
    /// The converted amount, present when an amount was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_amount: Option<f64>,
}

impl ConvertResponse {
    pub fn new(new_currency_rate: f64, converted_amount: Option<f64>) -> Self {
        Self {
            new_currency_rate,
            converted_amount,
        }
    }
}

/// Counters for one cache tier
#[derive(Debug, Clone, Serialize)]
pub struct TierStats {
    pub hits: u64,
    pub misses: u64,
    pub refreshes: u64,
    pub upstream_errors: u64,
    /// Fraction of lookups served without an upstream call
    pub hit_rate: f64,
    /// Configured TTL in milliseconds
    pub ttl_ms: i64,
}

impl TierStats {
    pub fn new(stats: &CacheStats, ttl_ms: i64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            refreshes: stats.refreshes,
            upstream_errors: stats.upstream_errors,
            hit_rate: stats.hit_rate(),
            ttl_ms,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Rate table cache
    pub rates: TierStats,
    /// Currency code list cache
    pub currency_codes: TierStats,
    /// Number of base currencies with a stored rate table
    pub stored_rate_tables: i64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
