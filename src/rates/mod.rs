//! Currency exchange rates: the HTTP rate source and the run-scoped provider.

mod client;
mod provider;

pub use client::{ExchangeRateClient, RateSource, DEFAULT_RATE_URL};
pub use provider::{RateProvider, FALLBACK_KZT_RUB};
