//! Cache Module
//!
//! Two TTL tiers over the rate provider: per-base rate tables and the
//! currency code list, both persisted in the rate store.

mod codes;
mod entry;
mod rates;
mod stats;


// Re-export public types
pub use codes::CurrencyListCache;
pub use entry::{current_timestamp_ms, is_stale, Freshness};
pub use rates::RateCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Rate tables are re-fetched once older than 12 hours
pub const RATES_TTL_MS: i64 = 43_200_000;

/// The code list is re-fetched once older than 7 days
pub const CODES_TTL_MS: i64 = 604_800_000;
