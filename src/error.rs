//! Error types for the currency converter
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Converter Error Enum ==
/// Unified error type for the converter service.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// A required currency argument was missing or empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No conversion rate available for the requested pair
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx, unreachable or unparseable response from the rate provider
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Persistence layer failure
    #[error("Store error: {0}")]
    Store(String),
}

impl From<sqlx::Error> for ConverterError {
    fn from(err: sqlx::Error) -> Self {
        ConverterError::Store(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ConverterError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConverterError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ConverterError::NotFound(_) => StatusCode::NOT_FOUND,
            ConverterError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ConverterError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the converter service.
pub type Result<T> = std::result::Result<T, ConverterError>;
