//! Rate Cache Module
//!
//! Per-base-currency rate tables, served from the store while fresh and
//! re-fetched from the provider once older than the rate TTL.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, CacheStats, Freshness};
use crate::error::{ConverterError, Result};
use crate::store::{CurrencyRateRecord, RateStore, RateTable};
use crate::upstream::RateProvider;

// == Rate Cache ==
/// TTL cache of rate tables keyed by base currency.
///
/// There is no lock around check-then-refresh: two concurrent lookups of the
/// same stale base both call the provider and the last write wins.
#[derive(Clone)]
pub struct RateCache {
    store: RateStore,
    provider: Arc<dyn RateProvider>,
    ttl_ms: i64,
    stats: Arc<RwLock<CacheStats>>,
}

impl RateCache {
    // == Constructor ==
    /// Creates a rate cache over `store`, refreshing through `provider`.
    ///
    /// # Arguments
    /// * `ttl_ms` - Maximum age of a stored table before it is re-fetched
    pub fn new(store: RateStore, provider: Arc<dyn RateProvider>, ttl_ms: i64) -> Self {
        Self {
            store,
            provider,
            ttl_ms,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        }
    }

    // == Get Rates ==
    /// Returns the rate table for `base`, fetching or refreshing it as needed.
    pub async fn get_rates(&self, base: &str) -> Result<RateTable> {
        self.get_rates_at(base, current_timestamp_ms()).await
    }

    /// Same as [`get_rates`](Self::get_rates) with an explicit clock reading.
    ///
    /// Makes at most one provider call and at most one store write.
    pub async fn get_rates_at(&self, base: &str, now: i64) -> Result<RateTable> {
        let base = base.trim();
        if base.is_empty() {
            return Err(ConverterError::InvalidInput(
                "No currency provided!".to_string(),
            ));
        }

        let existing = self.store.get_rate_record(base).await?;
        let freshness = Freshness::of(existing.as_ref().map(|r| r.last_updated), now, self.ttl_ms);

        match (freshness, existing) {
            (Freshness::Fresh, Some(record)) => {
                debug!("Rates for {} served from store", base);
                self.stats.write().await.record_hit();
                return Ok(record.rates);
            }
            (Freshness::Stale, _) => {
                info!("Rates for {} out of date, updating...", base);
                self.stats.write().await.record_refresh();
            }
            _ => {
                info!("No rates stored for {}, fetching", base);
                self.stats.write().await.record_miss();
            }
        }

        let rates = match self.provider.fetch_rates(base).await {
            Ok(rates) => rates,
            Err(e) => {
                self.stats.write().await.record_upstream_error();
                return Err(e);
            }
        };

        let record = CurrencyRateRecord::new(base, rates, now);
        self.store.put_rate_record(&record).await?;

        Ok(record.rates)
    }

    // == Accessors ==
    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Returns a snapshot of the lookup counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }
}
