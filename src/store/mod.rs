//! Store Module
//!
//! SQLite persistence for cached rate tables and the currency code list.

mod records;
mod sqlite;

// Re-export public types
pub use records::{CurrencyCodeListRecord, CurrencyRateRecord, RateTable};
pub use sqlite::RateStore;

// == Public Constants ==
/// Fixed primary key of the singleton code-list row
pub const CODE_LIST_ID: &str = "currencyCodes";
