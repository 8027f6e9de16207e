//! Raw regional price lookup command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::pricing::cache::PriceCache;
use crate::pricing::fetcher::RegionalPriceFetcher;
use crate::steam::client::{SteamClient, Storefront};
use crate::steam::models::ProductRef;
use crate::steam::regions::Region;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Shows a product's storefront price in each requested region.
pub struct PriceCommand {
    config: Config,
}

impl PriceCommand {
    /// Creates a new price command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches `product` in `regions` (the configured pair when empty).
    pub async fn execute(&self, product: &str, regions: &[Region]) -> Result<String> {
        let storefront = SteamClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(storefront, product, regions).await
    }

    /// Fetches prices with a provided storefront (for testing).
    pub async fn execute_with_client<S: Storefront>(
        &self,
        storefront: S,
        product: &str,
        regions: &[Region],
    ) -> Result<String> {
        let product: ProductRef = product.parse()?;
        let regions = if regions.is_empty() {
            vec![self.config.region, self.config.compare_region]
        } else {
            regions.to_vec()
        };

        let fetcher = RegionalPriceFetcher::new(storefront, Arc::new(PriceCache::new()));
        let mut prices = Vec::with_capacity(regions.len());

        for region in regions {
            info!("Looking up {} in {}", product, region);
            prices.push((region, fetcher.fetch(&product, region).await));
        }

        let formatter = Formatter::new(self.config.format).with_layout(self.config.layout);
        Ok(formatter.format_regional_prices(&product, &prices))
    }
}
