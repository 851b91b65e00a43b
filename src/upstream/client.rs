//! Exchange-rate HTTP client
//!
//! Issues `GET {base_url}/{CODE}` against the configured provider and parses
//! the `rates` object out of the JSON body.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::RateProvider;
use crate::error::{ConverterError, Result};
use crate::store::RateTable;

/// Provider response body; fields other than `rates` are ignored.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: RateTable,
}

/// Rate provider backed by an HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
}

impl HttpRateProvider {
    /// Creates a provider rooted at `base_url`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a provider that reuses an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// URL queried for the given base currency.
    pub fn rates_url(&self, base: &str) -> String {
        format!("{}/{}", self.base_url, base.trim().to_uppercase())
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = self.rates_url(base);
        debug!("Fetching rates from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Upstream request to {} failed: {}", url, e);
            ConverterError::Upstream(format!("request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {} for {}", status, url);
            return Err(ConverterError::Upstream(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let body: RatesResponse = response.json().await.map_err(|e| {
            warn!("Upstream body from {} is not a rates document: {}", url, e);
            ConverterError::Upstream(format!("malformed response from {}: {}", url, e))
        })?;

        Ok(body.rates)
    }
}
