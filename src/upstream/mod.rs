//! Upstream Module
//!
//! Fetches exchange rates from the external rate provider.

mod client;

pub use client::HttpRateProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::RateTable;

/// Base currency whose rate table doubles as the list of known codes.
pub const CODE_LIST_BASE: &str = "USD";

// == Rate Provider ==
/// Source of exchange rates.
///
/// The caches depend on this trait rather than on the HTTP client so tests
/// can count and script upstream calls.
#[async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the rate table for `base`.
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;

    /// Fetches the list of known currency codes.
    ///
    /// Derived from the key set of the USD rate table, so USD must always be
    /// a valid base upstream.
    async fn fetch_code_list(&self) -> Result<Vec<String>> {
        let rates = self.fetch_rates(CODE_LIST_BASE).await?;
        Ok(rates.into_keys().collect())
    }
}
