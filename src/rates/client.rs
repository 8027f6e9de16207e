//! HTTP client for the currency rate source.

use crate::config::Config;
use crate::pricing::money::CurrencyCode;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

pub const DEFAULT_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/{from}";

/// Trait for rate lookups - enables mocking for tests.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Returns how many units of `to` one unit of `from` buys.
    async fn fetch_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<f64>;
}

/// Rate response body. Providers disagree on shape, so every known field is optional.
#[derive(Debug, Default, Deserialize)]
struct RateResponse {
    /// `{ "rates": { "RUB": 0.15 } }` (exchangerate-api.com)
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
    /// `{ "result": 0.15 }` (exchangerate.host convert)
    #[serde(default)]
    result: Option<f64>,
    /// `{ "info": { "quote": 0.15 } }`
    #[serde(default)]
    info: Option<RateInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct RateInfo {
    #[serde(default)]
    quote: Option<f64>,
}

impl RateResponse {
    fn rate_for(&self, to: CurrencyCode) -> Option<f64> {
        self.rates
            .as_ref()
            .and_then(|rates| rates.get(to.code()).copied())
            .or(self.result)
            .or_else(|| self.info.as_ref().and_then(|info| info.quote))
    }
}

/// Client for a JSON exchange rate API addressed by a URL template.
///
/// The template may contain `{from}` and `{to}` placeholders.
pub struct ExchangeRateClient {
    client: Client,
    url_template: String,
}

impl ExchangeRateClient {
    /// Creates a rate client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_url(config.rate_url.clone(), config.timeout_secs)
    }

    /// Creates a rate client for a specific URL template.
    pub fn with_url(url_template: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(false)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, url_template })
    }

    fn url(&self, from: CurrencyCode, to: CurrencyCode) -> String {
        self.url_template.replace("{from}", from.code()).replace("{to}", to.code())
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    async fn fetch_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<f64> {
        let url = self.url(from, to);

        info!("Fetching {} -> {} rate", from, to);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            anyhow::bail!("Rate source returned status: {}", response.status());
        }

        let body = response.text().await.context("Failed to read response body")?;
        let parsed: RateResponse =
            serde_json::from_str(&body).context("Malformed rate response")?;

        parsed
            .rate_for(to)
            .with_context(|| format!("Rate response has no {} rate", to))
    }
}
