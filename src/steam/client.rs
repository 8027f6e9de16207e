//! HTTP client for the Steam storefront `appdetails` / `packagedetails` API.

use crate::config::Config;
use crate::steam::models::{DetailsResponse, ProductEnvelope, ProductKind, ProductRef};
use crate::steam::regions::Region;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

pub const STEAM_STORE_BASE: &str = "https://store.steampowered.com";

/// Trait for storefront lookups - enables mocking for tests.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Fetches the product envelope for `product` as priced in `region`.
    ///
    /// `Ok(None)` means the response carried no entry for the product id.
    async fn details(&self, product: &ProductRef, region: Region)
        -> Result<Option<ProductEnvelope>>;
}

/// Steam storefront client.
///
/// Built without a cookie store: the `cc` parameter alone decides the region,
/// never a session or `steamCountry` cookie.
pub struct SteamClient {
    client: Client,
    base_url: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl SteamClient {
    /// Creates a storefront client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(false)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.store_url.trim_end_matches('/').to_string(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Builds the details URL for a product in a region.
    ///
    /// App requests keep the `basic` group so free apps still report `is_free`.
    fn details_url(&self, product: &ProductRef, region: Region) -> String {
        match product.kind {
            ProductKind::App => format!(
                "{}/api/appdetails?appids={}&cc={}&filters=basic,price_overview",
                self.base_url, product.id, region
            ),
            ProductKind::Package => format!(
                "{}/api/packagedetails?packageids={}&cc={}",
                self.base_url, product.id, region
            ),
        }
    }

    async fn get(&self, url: &str) -> Result<String> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 429 {
            warn!("Rate limited (429). Consider increasing --delay.");
            anyhow::bail!("Rate limited by the Steam storefront. Try increasing --delay.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds a random delay between storefront requests.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl Storefront for SteamClient {
    async fn details(
        &self,
        product: &ProductRef,
        region: Region,
    ) -> Result<Option<ProductEnvelope>> {
        let url = self.details_url(product, region);

        info!("Fetching {} price in {}", product, region);
        let body = self.get(&url).await?;

        let mut response: DetailsResponse = serde_json::from_str(&body)
            .with_context(|| format!("Malformed details response for {}", product))?;

        Ok(response.remove(&product.id))
    }
}
