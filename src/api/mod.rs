//! API Module
//!
//! HTTP handlers and routing for the converter REST API.
//!
//! # Endpoints
//! - `GET /api/currencies` - Known currency codes
//! - `POST /api/convert` - Rate between two currencies
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
