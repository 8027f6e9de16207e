//! Exchange rate lookup command implementation.

use crate::config::{Config, OutputFormat};
use crate::pricing::money::CurrencyCode;
use crate::rates::{ExchangeRateClient, RateSource};
use anyhow::{Context, Result};

/// Shows the exchange rate the comparison would use.
pub struct RateCommand {
    config: Config,
}

impl RateCommand {
    /// Creates a new rate command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves the `from` -> `to` rate and returns formatted output.
    pub async fn execute(&self, from: CurrencyCode, to: CurrencyCode) -> Result<String> {
        let client =
            ExchangeRateClient::new(&self.config).context("Failed to create rate client")?;
        self.execute_with_client(client, from, to).await
    }

    /// Resolves a rate with a provided source (for testing).
    pub async fn execute_with_client<R: RateSource>(
        &self,
        source: R,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<String> {
        let provider = super::rate_provider(&self.config, source);
        let rate = provider.rate(from, to).await?;

        Ok(match self.config.format {
            OutputFormat::Json => serde_json::to_string_pretty(&rate)?,
            _ => format!(
                "{}\n100 {} ≈ {:.2} {}",
                rate,
                rate.from,
                100.0 * rate.rate,
                rate.to
            ),
        })
    }
}
