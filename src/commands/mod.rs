//! CLI command implementations.

pub mod compare;
pub mod price;
pub mod rate;
pub mod text;

pub use compare::CompareCommand;
pub use price::PriceCommand;
pub use rate::RateCommand;
pub use text::{ConvertCommand, ParseCommand};

use crate::config::Config;
use crate::pricing::cache::PriceCache;
use crate::pricing::fetcher::RegionalPriceFetcher;
use crate::pricing::money::CurrencyCode;
use crate::pricing::pipeline::PricePipeline;
use crate::rates::{RateProvider, RateSource};
use crate::steam::client::Storefront;
use std::sync::Arc;

/// Builds a rate provider with the configured KZT -> RUB fallback.
pub(crate) fn rate_provider<R: RateSource>(config: &Config, source: R) -> RateProvider<R> {
    RateProvider::with_fallback(source, CurrencyCode::Kzt, CurrencyCode::Rub, config.fallback_rate)
}

/// Wires a storefront and a rate source into a pipeline with a fresh cache.
pub(crate) fn pipeline<S: Storefront, R: RateSource>(
    config: &Config,
    storefront: S,
    rates: R,
) -> PricePipeline<S, R> {
    let fetcher = RegionalPriceFetcher::new(storefront, Arc::new(PriceCache::new()));
    PricePipeline::new(fetcher, rate_provider(config, rates), config.clone())
}
