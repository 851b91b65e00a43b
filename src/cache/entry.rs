//! Freshness Module
//!
//! TTL arithmetic shared by the rate cache and the code-list cache.

use chrono::Utc;

// == Freshness ==
/// State of a cached record relative to its TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Nothing stored yet
    Missing,
    /// Stored and within the TTL window
    Fresh,
    /// Stored but older than the TTL
    Stale,
}

impl Freshness {
    /// Classifies a record by its `last_updated` timestamp.
    ///
    /// Boundary condition: a record is stale only once its age strictly
    /// exceeds the TTL. A record exactly `ttl_ms` old is still fresh.
    pub fn of(last_updated: Option<i64>, now: i64, ttl_ms: i64) -> Self {
        match last_updated {
            None => Freshness::Missing,
            Some(last) if is_stale(last, now, ttl_ms) => Freshness::Stale,
            Some(_) => Freshness::Fresh,
        }
    }
}

/// Returns true when `now - last_updated > ttl_ms`.
pub fn is_stale(last_updated: i64, now: i64, ttl_ms: i64) -> bool {
    now.saturating_sub(last_updated) > ttl_ms
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CODES_TTL_MS, RATES_TTL_MS};

    const HOUR_MS: i64 = 60 * 60 * 1000;
    const DAY_MS: i64 = 24 * HOUR_MS;

    #[test]
    fn test_missing_record() {
        assert_eq!(Freshness::of(None, 1_000, RATES_TTL_MS), Freshness::Missing);
    }

    #[test]
    fn test_rates_fresh_after_one_hour() {
        let now = current_timestamp_ms();
        assert_eq!(
            Freshness::of(Some(now - HOUR_MS), now, RATES_TTL_MS),
            Freshness::Fresh
        );
    }

    #[test]
    fn test_rates_stale_after_thirteen_hours() {
        let now = current_timestamp_ms();
        assert_eq!(
            Freshness::of(Some(now - 13 * HOUR_MS), now, RATES_TTL_MS),
            Freshness::Stale
        );
    }

    #[test]
    fn test_code_list_stale_after_eight_days() {
        let now = current_timestamp_ms();
        assert_eq!(
            Freshness::of(Some(now - 8 * DAY_MS), now, CODES_TTL_MS),
            Freshness::Stale
        );
        assert_eq!(
            Freshness::of(Some(now - 6 * DAY_MS), now, CODES_TTL_MS),
            Freshness::Fresh
        );
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = 10 * RATES_TTL_MS;
        assert!(!is_stale(now - RATES_TTL_MS, now, RATES_TTL_MS));
        assert!(is_stale(now - RATES_TTL_MS - 1, now, RATES_TTL_MS));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let now = current_timestamp_ms();
        assert!(!is_stale(now + DAY_MS, now, RATES_TTL_MS));
    }
}
