//! Request DTOs for the converter API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::convert::EditedSide;

/// Body of the conversion request (POST /api/convert)
///
/// Accepted as a url-encoded form or as JSON. Every field is optional at the
/// wire level so that missing currencies are reported as invalid input
/// instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Base currency code
    #[serde(default)]
    pub from_currency: Option<String>,
    /// Target currency code, any case
    #[serde(default)]
    pub to_currency: Option<String>,
    /// Optional amount to convert
    #[serde(default)]
    pub amount: Option<f64>,
    /// Which side `amount` belongs to (defaults to `from`)
    #[serde(default)]
    pub last_edited: EditedSide,
}

impl ConvertRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let blank = |field: &Option<String>| field.as_deref().map_or(true, |v| v.trim().is_empty());
        if blank(&self.from_currency) || blank(&self.to_currency) {
            return Some("No currency provided!".to_string());
        }
        None
    }
}
