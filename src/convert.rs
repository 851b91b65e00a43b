//! Conversion Module
//!
//! Looks up the rate between two currencies through the rate cache and
//! applies it to an amount.

use serde::Deserialize;

use crate::cache::{current_timestamp_ms, RateCache};
use crate::error::{ConverterError, Result};
use crate::store::RateTable;

// == Convert ==
/// Returns the rate from `from` to `to`.
///
/// `to` is matched case-insensitively; `from` is passed to the rate cache as
/// given.
pub async fn convert(cache: &RateCache, from: &str, to: &str) -> Result<f64> {
    convert_at(cache, from, to, current_timestamp_ms()).await
}

/// Explicit-clock variant of [`convert`].
pub async fn convert_at(cache: &RateCache, from: &str, to: &str, now: i64) -> Result<f64> {
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(ConverterError::InvalidInput(
            "No currency provided!".to_string(),
        ));
    }

    let rates = cache.get_rates_at(from, now).await?;
    lookup_rate(&rates, from, to)
}

// == Lookup Rate ==
/// Picks `rates[TO]` out of `from`'s table.
///
/// A stored rate of exactly zero counts as missing.
pub fn lookup_rate(rates: &RateTable, from: &str, to: &str) -> Result<f64> {
    match rates.get(&to.to_uppercase()) {
        Some(&rate) if rate != 0.0 && !rate.is_nan() => Ok(rate),
        _ => Err(ConverterError::NotFound(format!(
            "No currency conversion for {} and {}",
            from, to
        ))),
    }
}

// == Amount Conversion ==
/// Which amount field the user typed into last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditedSide {
    /// The source amount was edited; compute the target amount
    #[default]
    From,
    /// The target amount was edited; compute the source amount
    To,
}

/// Applies `rate` to `amount`, rounded to cents.
///
/// Returns `None` when the result is not a finite number.
pub fn convert_amount(amount: f64, rate: f64, side: EditedSide) -> Option<f64> {
    let raw = match side {
        EditedSide::From => amount * rate,
        EditedSide::To => amount / rate,
    };
    let rounded = (raw * 100.0).round() / 100.0;
    rounded.is_finite().then_some(rounded)
}
