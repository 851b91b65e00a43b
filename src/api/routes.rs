//! API Routes
//!
//! Configures the Axum router with all converter endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    convert_handler, currencies_handler, health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/currencies` - Known currency codes
/// - `POST /api/convert` - Rate between two currencies
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so a separately served form can call the API
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/currencies", get(currencies_handler))
        .route("/api/convert", post(convert_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
