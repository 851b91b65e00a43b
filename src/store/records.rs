//! Store Records
//!
//! Row types persisted by the rate store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Exchange rates keyed by target currency code, in the order the provider sent them.
pub type RateTable = IndexMap<String, f64>;

// == Currency Rate Record ==
/// Cached rate table for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRateRecord {
    /// Base currency code, the row's primary key
    pub currency_code: String,
    /// Time of the last upstream fetch (Unix milliseconds)
    pub last_updated: i64,
    /// Rates from the base currency to every other known currency
    pub rates: RateTable,
}

impl CurrencyRateRecord {
    pub fn new(currency_code: impl Into<String>, rates: RateTable, last_updated: i64) -> Self {
        Self {
            currency_code: currency_code.into(),
            last_updated,
            rates,
        }
    }
}

// == Currency Code List Record ==
/// The singleton list of supported currency codes.
///
/// At most one exists; the store keys it under a fixed id that never leaves
/// the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyCodeListRecord {
    /// Known currency codes in upstream order
    pub currency_codes: Vec<String>,
    /// Time of the last upstream fetch (Unix milliseconds)
    pub last_updated: i64,
}

impl CurrencyCodeListRecord {
    pub fn new(currency_codes: Vec<String>, last_updated: i64) -> Self {
        Self {
            currency_codes,
            last_updated,
        }
    }
}
