//! Run-scoped exchange rate provider with a constant fallback.

use super::client::RateSource;
use crate::error::{PriceError, Result};
use crate::pricing::money::{CurrencyCode, ExchangeRate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// KZT -> RUB rate used when the rate source is unreachable.
pub const FALLBACK_KZT_RUB: f64 = 0.15185;

/// Resolves exchange rates at most once per currency pair per run.
///
/// The fetch happens under the lock, so concurrent callers for the same pair
/// wait for the first request instead of issuing their own.
pub struct RateProvider<S> {
    source: S,
    fallbacks: HashMap<(CurrencyCode, CurrencyCode), f64>,
    rates: Mutex<HashMap<(CurrencyCode, CurrencyCode), ExchangeRate>>,
    degraded_logged: AtomicBool,
}

impl<S: RateSource> RateProvider<S> {
    /// Creates a provider with the default KZT -> RUB fallback.
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, CurrencyCode::Kzt, CurrencyCode::Rub, FALLBACK_KZT_RUB)
    }

    /// Creates a provider with a single fallback pair (the inverse is derived).
    pub fn with_fallback(source: S, from: CurrencyCode, to: CurrencyCode, rate: f64) -> Self {
        let mut fallbacks = HashMap::new();
        fallbacks.insert((from, to), rate);
        Self {
            source,
            fallbacks,
            rates: Mutex::new(HashMap::new()),
            degraded_logged: AtomicBool::new(false),
        }
    }

    /// Adds another fallback pair.
    pub fn fallback(mut self, from: CurrencyCode, to: CurrencyCode, rate: f64) -> Self {
        self.fallbacks.insert((from, to), rate);
        self
    }

    /// Returns the rate from `from` to `to`.
    ///
    /// Fails only when the source is unavailable and no fallback covers the pair.
    pub async fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<ExchangeRate> {
        if from == to {
            return Ok(ExchangeRate::identity(from));
        }

        let mut rates = self.rates.lock().await;

        if let Some(rate) = rates.get(&(from, to)) {
            return Ok(*rate);
        }
        if let Some(rate) = rates.get(&(to, from)) {
            debug!("Deriving {} -> {} from cached inverse", from, to);
            return Ok(rate.inverse());
        }

        let fetched = match self.source.fetch_rate(from, to).await {
            Ok(value) => ExchangeRate::new(from, to, value).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        let rate = match fetched {
            Ok(rate) => {
                debug!("Using live rate {}", rate);
                rate
            }
            Err(e) => {
                let rate = self.fallback_for(from, to)?;
                if !self.degraded_logged.swap(true, Ordering::SeqCst) {
                    warn!("Rate source unavailable ({:#}), using fallback {}", e, rate);
                }
                rate
            }
        };

        rates.insert((from, to), rate);
        Ok(rate)
    }

    fn fallback_for(&self, from: CurrencyCode, to: CurrencyCode) -> Result<ExchangeRate> {
        if let Some(&value) = self.fallbacks.get(&(from, to)) {
            return ExchangeRate::new(from, to, value);
        }
        if let Some(&value) = self.fallbacks.get(&(to, from)) {
            return ExchangeRate::new(to, from, value).map(|rate| rate.inverse());
        }
        Err(PriceError::RateUnavailable { from, to })
    }
}
