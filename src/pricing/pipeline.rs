//! Parser -> fetcher + rates -> comparator, for one product at a time.

use super::cache::RegionalPrice;
use super::compare::{compare, ComparisonResult};
use super::fetcher::RegionalPriceFetcher;
use super::money::{CurrencyCode, ExchangeRate, Money};
use super::parser::parse_price;
use crate::config::Config;
use crate::error::{PriceError, Result};
use crate::rates::{RateProvider, RateSource};
use crate::steam::client::Storefront;
use crate::steam::models::ProductRef;
use crate::steam::regions::Region;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the comparison against the other region produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Compared(ComparisonResult),
    /// The compared region lists the product as free.
    Free,
    /// The reference region lists the product as free. `compared` is the
    /// compared region's price in the display currency, if it has one.
    ReferenceFree { compared: Option<Money> },
    /// The compared region has no price.
    Unavailable,
}

/// Everything an annotation sink needs to render one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub product: ProductRef,
    pub reference_region: Region,
    pub compared_region: Region,
    /// Reference price as shown (or listed) in its own currency
    pub reference_native: Money,
    /// Reference price in the display currency
    pub reference_display: Money,
    /// Compared region's price in its own currency
    pub compared_native: RegionalPrice,
    pub display_currency: CurrencyCode,
    /// Non-identity rates applied to reach the display currency
    #[serde(default)]
    pub rates: Vec<ExchangeRate>,
    pub outcome: Outcome,
}

impl ComparisonReport {
    /// Returns the comparison result, if both sides had prices.
    pub fn result(&self) -> Option<&ComparisonResult> {
        match &self.outcome {
            Outcome::Compared(result) => Some(result),
            _ => None,
        }
    }
}

/// The configured price-comparison pipeline.
pub struct PricePipeline<S, R> {
    fetcher: RegionalPriceFetcher<S>,
    rates: RateProvider<R>,
    config: Config,
}

impl<S: Storefront, R: RateSource> PricePipeline<S, R> {
    pub fn new(fetcher: RegionalPriceFetcher<S>, rates: RateProvider<R>, config: Config) -> Self {
        Self { fetcher, rates, config }
    }

    /// Compares a price as displayed on a store page against the other region.
    ///
    /// The detected currency decides which region the page belongs to.
    pub async fn compare_page_price(
        &self,
        product: &ProductRef,
        price_text: &str,
    ) -> Result<ComparisonReport> {
        let reference = parse_price(price_text)?;
        let region = Region::from_currency(reference.currency);
        debug!("Page price {} belongs to region {}", reference, region);

        self.compare_with_reference(product, reference, region).await
    }

    /// Compares the home region's listed price against the compare region.
    pub async fn compare_regions(&self, product: &ProductRef) -> Result<ComparisonReport> {
        let home = self.config.region;

        match self.fetcher.fetch(product, home).await {
            RegionalPrice::Priced(reference) => {
                self.compare_with_reference(product, reference, home).await
            }
            RegionalPrice::Free => {
                let compared_region = self.config.counterpart(home);
                let zero = Money::new(0.0, home.currency());
                let mut rates = Vec::new();
                let reference_display = self.to_display(zero, &mut rates).await?;

                let compared_native = self.fetcher.fetch(product, compared_region).await;
                let compared = match compared_native.money() {
                    Some(price) => Some(self.to_display(price, &mut rates).await?),
                    None => None,
                };

                Ok(ComparisonReport {
                    product: product.clone(),
                    reference_region: home,
                    compared_region,
                    reference_native: zero,
                    reference_display,
                    compared_native,
                    display_currency: self.config.display_currency,
                    rates,
                    outcome: Outcome::ReferenceFree { compared },
                })
            }
            RegionalPrice::Unavailable => {
                Err(PriceError::Fetch(format!("no {} price for {}", home, product)))
            }
        }
    }

    /// Compares `reference`, seen in `region`, against the counterpart region.
    pub async fn compare_with_reference(
        &self,
        product: &ProductRef,
        reference: Money,
        region: Region,
    ) -> Result<ComparisonReport> {
        let compared_region = self.config.counterpart(region);
        let mut rates = Vec::new();
        let reference_display = self.to_display(reference, &mut rates).await?;

        let compared_native = self.fetcher.fetch(product, compared_region).await;

        let outcome = match compared_native {
            RegionalPrice::Priced(price) => {
                let compared_display = self.to_display(price, &mut rates).await?;
                Outcome::Compared(compare(reference_display, compared_display)?)
            }
            RegionalPrice::Free => Outcome::Free,
            RegionalPrice::Unavailable => Outcome::Unavailable,
        };

        Ok(ComparisonReport {
            product: product.clone(),
            reference_region: region,
            compared_region,
            reference_native: reference,
            reference_display,
            compared_native,
            display_currency: self.config.display_currency,
            rates,
            outcome,
        })
    }

    /// Returns the rate from `currency` to the display currency.
    pub async fn display_rate(&self, currency: CurrencyCode) -> Result<ExchangeRate> {
        self.rates.rate(currency, self.config.display_currency).await
    }

    /// Converts `money` to the display currency, recording the rate applied.
    async fn to_display(&self, money: Money, used: &mut Vec<ExchangeRate>) -> Result<Money> {
        let rate = self.display_rate(money.currency).await?;
        if rate.from != rate.to && !used.contains(&rate) {
            used.push(rate);
        }
        money.convert(&rate)
    }
}
