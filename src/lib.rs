//! Currency Converter - exchange rates behind a two-tier TTL cache
//!
//! Fetches rate tables from an upstream provider, keeps them in SQLite, and
//! serves conversions over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod models;
pub mod store;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{ConverterError, Result};
