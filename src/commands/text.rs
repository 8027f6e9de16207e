//! Price text commands: parse a displayed price, annotate tenge amounts.

use crate::config::{Config, OutputFormat};
use crate::pricing::money::CurrencyCode;
use crate::pricing::parser::{convert_text, parse_price};
use crate::rates::{ExchangeRateClient, RateSource};
use crate::steam::regions::Region;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ParsedPrice<'a> {
    text: &'a str,
    amount: f64,
    currency: CurrencyCode,
    region: Region,
}

/// Parses a price as displayed on a store page.
pub struct ParseCommand {
    format: OutputFormat,
}

impl ParseCommand {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn execute(&self, text: &str) -> Result<String> {
        let money = parse_price(text)?;
        let region = Region::from_currency(money.currency);

        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&ParsedPrice {
                text,
                amount: money.amount,
                currency: money.currency,
                region,
            })?,
            _ => format!("{} ({} storefront)", money, region.label()),
        })
    }
}

/// Appends display-currency estimates to tenge amounts in free text.
pub struct ConvertCommand {
    config: Config,
}

impl ConvertCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Converts every line of `input`.
    pub async fn execute(&self, input: &str) -> Result<String> {
        let client =
            ExchangeRateClient::new(&self.config).context("Failed to create rate client")?;
        self.execute_with_client(client, input).await
    }

    /// Converts `input` with a provided rate source (for testing).
    pub async fn execute_with_client<R: RateSource>(&self, source: R, input: &str) -> Result<String> {
        if !input.contains('₸') || self.config.display_currency == CurrencyCode::Kzt {
            return Ok(input.to_string());
        }

        let provider = super::rate_provider(&self.config, source);
        let rate = provider.rate(CurrencyCode::Kzt, self.config.display_currency).await?;

        let lines = input
            .lines()
            .map(|line| convert_text(line, &rate))
            .collect::<crate::error::Result<Vec<_>>>()?;

        Ok(lines.join("\n"))
    }
}
