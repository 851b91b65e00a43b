//! Currency List Cache Module
//!
//! The singleton list of known currency codes, refreshed once it is older
//! than the code-list TTL.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, CacheStats, Freshness};
use crate::error::Result;
use crate::store::{CurrencyCodeListRecord, RateStore};
use crate::upstream::RateProvider;

// == Currency List Cache ==
/// TTL cache over the provider's currency code list.
///
/// Shares the rate cache's race: concurrent stale lookups each fetch and
/// write, last write wins.
#[derive(Clone)]
pub struct CurrencyListCache {
    store: RateStore,
    provider: Arc<dyn RateProvider>,
    ttl_ms: i64,
    stats: Arc<RwLock<CacheStats>>,
}

impl CurrencyListCache {
    pub fn new(store: RateStore, provider: Arc<dyn RateProvider>, ttl_ms: i64) -> Self {
        Self {
            store,
            provider,
            ttl_ms,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        }
    }

    // == Get Currency Codes ==
    /// Returns the known currency codes, fetching or refreshing as needed.
    pub async fn get_currency_codes(&self) -> Result<Vec<String>> {
        Ok(self.get_code_list_record().await?.currency_codes)
    }

    /// Returns the full code-list record, including when it was fetched.
    pub async fn get_code_list_record(&self) -> Result<CurrencyCodeListRecord> {
        self.get_code_list_record_at(current_timestamp_ms()).await
    }

    /// Explicit-clock variant of [`get_code_list_record`](Self::get_code_list_record).
    ///
    /// Makes at most one provider call and at most one store write.
    pub async fn get_code_list_record_at(&self, now: i64) -> Result<CurrencyCodeListRecord> {
        let existing = self.store.get_code_list().await?;
        let freshness = Freshness::of(existing.as_ref().map(|r| r.last_updated), now, self.ttl_ms);

        match (freshness, existing) {
            (Freshness::Fresh, Some(record)) => {
                debug!("Currency codes served from store");
                self.stats.write().await.record_hit();
                return Ok(record);
            }
            (Freshness::Stale, _) => {
                info!("Currencies out of date, updating...");
                self.stats.write().await.record_refresh();
            }
            _ => {
                info!("Populating currency code list");
                self.stats.write().await.record_miss();
            }
        }

        let codes = match self.provider.fetch_code_list().await {
            Ok(codes) => codes,
            Err(e) => {
                self.stats.write().await.record_upstream_error();
                return Err(e);
            }
        };

        let record = CurrencyCodeListRecord::new(codes, now);
        self.store.put_code_list(&record).await?;
        info!("Stored {} currency codes", record.currency_codes.len());

        Ok(record)
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
