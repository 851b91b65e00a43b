//! API Handlers
//!
//! HTTP request handlers for each converter endpoint.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::cache::{CurrencyListCache, RateCache};
use crate::config::Config;
use crate::convert::{convert, convert_amount};
use crate::error::{ConverterError, Result};
use crate::models::{
    ConvertRequest, ConvertResponse, CurrencyCodesResponse, HealthResponse, StatsResponse,
    TierStats,
};
use crate::store::RateStore;
use crate::upstream::{HttpRateProvider, RateProvider};

/// Application state shared across all handlers.
///
/// Both caches share one store and one provider. Nothing here is mutated by
/// request handling except the lookup counters.
#[derive(Clone)]
pub struct AppState {
    /// Per-base rate tables
    pub rates: RateCache,
    /// Currency code list
    pub codes: CurrencyListCache,
    /// Backing store
    pub store: RateStore,
}

impl AppState {
    /// Creates a new AppState over the given store and provider.
    pub fn new(
        store: RateStore,
        provider: Arc<dyn RateProvider>,
        rates_ttl_ms: i64,
        codes_ttl_ms: i64,
    ) -> Self {
        Self {
            rates: RateCache::new(store.clone(), provider.clone(), rates_ttl_ms),
            codes: CurrencyListCache::new(store.clone(), provider, codes_ttl_ms),
            store,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the database at `DATABASE_PATH` and points the provider at
    /// `EXCHANGE_RATE_BASE_URL`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = RateStore::connect(&config.database_path).await?;
        let provider = Arc::new(HttpRateProvider::new(&config.exchange_rate_base_url));
        Ok(Self::new(
            store,
            provider,
            config.rates_ttl_ms,
            config.codes_ttl_ms,
        ))
    }
}

/// Body extractor accepting either a url-encoded form or JSON.
///
/// JSON is chosen when the content type says so; anything else is parsed as
/// a form.
pub struct FormOrJson<T>(pub T);

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        }
    }
}

/// Handler for GET /api/currencies
///
/// Returns the currency code list, refreshing it first if it is missing or
/// older than the code-list TTL.
pub async fn currencies_handler(
    State(state): State<AppState>,
) -> Result<Json<CurrencyCodesResponse>> {
    let record = state.codes.get_code_list_record().await?;

    Ok(Json(CurrencyCodesResponse {
        currency_codes: record.currency_codes,
        last_updated: record.last_updated,
    }))
}

/// Handler for POST /api/convert
///
/// Returns the rate between `fromCurrency` and `toCurrency`, plus the
/// converted amount when one is supplied.
pub async fn convert_handler(
    State(state): State<AppState>,
    FormOrJson(req): FormOrJson<ConvertRequest>,
) -> Result<Json<ConvertResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ConverterError::InvalidInput(error_msg));
    }

    let from = req.from_currency.unwrap_or_default();
    let to = req.to_currency.unwrap_or_default();

    let rate = convert(&state.rates, &from, &to).await?;
    let converted_amount = req
        .amount
        .and_then(|amount| convert_amount(amount, rate, req.last_edited));

    info!("Converted {} -> {} at {}", from, to, rate);
    Ok(Json(ConvertResponse::new(rate, converted_amount)))
}

/// Handler for GET /stats
///
/// Returns lookup counters for both cache tiers.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let rates = state.rates.stats().await;
    let codes = state.codes.stats().await;
    let stored_rate_tables = state.store.rate_record_count().await?;

    Ok(Json(StatsResponse {
        rates: TierStats::new(&rates, state.rates.ttl_ms()),
        currency_codes: TierStats::new(&codes, state.codes.ttl_ms()),
        stored_rate_tables,
    }))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CODES_TTL_MS, RATES_TTL_MS};
    use crate::upstream::testing::StubProvider;

    async fn test_state(provider: StubProvider) -> (AppState, Arc<StubProvider>) {
        let store = RateStore::in_memory().await.unwrap();
        let provider = Arc::new(provider);
        let state = AppState::new(store, provider.clone(), RATES_TTL_MS, CODES_TTL_MS);
        (state, provider)
    }

    fn convert_request(from: &str, to: &str) -> ConvertRequest {
        ConvertRequest {
            from_currency: Some(from.to_string()),
            to_currency: Some(to.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_convert_handler() {
        let (state, _provider) =
            test_state(StubProvider::new().with_rates("USD", &[("GBP", 0.79), ("EUR", 0.91)])).await;

        let response = convert_handler(State(state), FormOrJson(convert_request("USD", "gbp")))
            .await
            .unwrap();

        assert_eq!(response.new_currency_rate, 0.79);
        assert!(response.converted_amount.is_none());
    }

    #[tokio::test]
    async fn test_convert_handler_with_amount() {
        let (state, _provider) =
            test_state(StubProvider::new().with_rates("USD", &[("GBP", 0.5)])).await;
        let req = ConvertRequest {
            amount: Some(10.0),
            ..convert_request("USD", "GBP")
        };

        let response = convert_handler(State(state), FormOrJson(req)).await.unwrap();

        assert_eq!(response.converted_amount, Some(5.0));
    }

    #[tokio::test]
    async fn test_convert_handler_missing_currency() {
        let (state, provider) = test_state(StubProvider::new()).await;

        let result = convert_handler(State(state), FormOrJson(ConvertRequest::default())).await;

        assert!(matches!(result, Err(ConverterError::InvalidInput(_))));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_currencies_handler() {
        let (state, provider) =
            test_state(StubProvider::new().with_rates("USD", &[("GBP", 0.79), ("EUR", 0.91)])).await;

        let first = currencies_handler(State(state.clone())).await.unwrap();
        let second = currencies_handler(State(state)).await.unwrap();

        assert_eq!(first.currency_codes, vec!["GBP", "EUR"]);
        assert_eq!(second.last_updated, first.last_updated);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _provider) =
            test_state(StubProvider::new().with_rates("USD", &[("GBP", 0.79)])).await;
        convert(&state.rates, "USD", "GBP").await.unwrap();
        convert(&state.rates, "USD", "GBP").await.unwrap();

        let response = stats_handler(State(state)).await.unwrap();

        assert_eq!(response.rates.misses, 1);
        assert_eq!(response.rates.hits, 1);
        assert_eq!(response.currency_codes.hits, 0);
        assert_eq!(response.stored_rate_tables, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
