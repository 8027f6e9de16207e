//! Regional price comparison command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::rates::{ExchangeRateClient, RateSource};
use crate::steam::client::{SteamClient, Storefront};
use crate::steam::models::ProductRef;
use anyhow::{Context, Result};
use tracing::info;

/// Compares products between the home and compare regions.
pub struct CompareCommand {
    config: Config,
}

impl CompareCommand {
    /// Creates a new compare command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compares `products` and returns formatted output.
    ///
    /// With `page_price`, the parsed text is the reference price of the single
    /// product instead of the home region's listed price.
    pub async fn execute(&self, products: &[String], page_price: Option<&str>) -> Result<String> {
        let storefront = SteamClient::new(&self.config).context("Failed to create HTTP client")?;
        let rates =
            ExchangeRateClient::new(&self.config).context("Failed to create rate client")?;

        self.execute_with_clients(storefront, rates, products, page_price).await
    }

    /// Compares products with provided clients (for testing).
    pub async fn execute_with_clients<S: Storefront, R: RateSource>(
        &self,
        storefront: S,
        rates: R,
        products: &[String],
        page_price: Option<&str>,
    ) -> Result<String> {
        let pipeline = super::pipeline(&self.config, storefront, rates);
        let formatter = Formatter::new(self.config.format).with_layout(self.config.layout);

        if let Some(text) = page_price {
            let [product] = products else {
                anyhow::bail!("--price compares exactly one product, got {}", products.len());
            };
            let product: ProductRef = product.parse()?;

            info!("Comparing page price '{}' for {}", text, product);
            let report = pipeline.compare_page_price(&product, text).await?;
            return Ok(formatter.format_report(&report));
        }

        if let [product] = products {
            let product: ProductRef = product.parse()?;

            info!("Comparing {}", product);
            let report = pipeline.compare_regions(&product).await?;
            return Ok(formatter.format_report(&report));
        }

        let mut reports = Vec::new();

        for input in products {
            let product: ProductRef = match input.parse() {
                Ok(product) => product,
                Err(e) => {
                    eprintln!("Skipping {}: {}", input, e);
                    continue;
                }
            };

            info!("Comparing {}", product);

            match pipeline.compare_regions(&product).await {
                Ok(report) => reports.push(report),
                Err(e) => eprintln!("Failed to compare {}: {}", product, e),
            }
        }

        Ok(formatter.format_reports(&reports))
    }
}
