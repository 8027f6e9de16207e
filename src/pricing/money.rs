//! Money amounts, currency codes and exchange rates.

use crate::error::{PriceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the storefront and the rate source can quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Kzt,
    Rub,
    Usd,
    Eur,
}

impl CurrencyCode {
    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Kzt => "KZT",
            CurrencyCode::Rub => "RUB",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
        }
    }

    /// Returns the display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Kzt => "₸",
            CurrencyCode::Rub => "₽",
            CurrencyCode::Usd => "$",
            CurrencyCode::Eur => "€",
        }
    }

    /// Returns the number of minor-unit digits (ISO 4217 exponent).
    pub fn minor_unit_exponent(&self) -> u32 {
        match self {
            CurrencyCode::Kzt | CurrencyCode::Rub | CurrencyCode::Usd | CurrencyCode::Eur => 2,
        }
    }

    /// Converts an integer amount in minor units (tiyn, kopecks, cents) to major units.
    pub fn from_minor_units(&self, minor: i64) -> f64 {
        minor as f64 / 10_f64.powi(self.minor_unit_exponent() as i32)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KZT" => Ok(CurrencyCode::Kzt),
            "RUB" => Ok(CurrencyCode::Rub),
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            _ => Err(format!("Unknown currency: {}. Use: KZT, RUB, USD, EUR", s)),
        }
    }
}

/// An amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl Money {
    /// Creates a new amount.
    pub fn new(amount: f64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Builds a store price from an integer in minor units.
    pub fn from_minor_units(minor: i64, currency: CurrencyCode) -> Self {
        Self { amount: currency.from_minor_units(minor), currency }
    }

    /// Converts this amount with the given rate.
    ///
    /// The rate's source currency must match this amount's currency.
    pub fn convert(&self, rate: &ExchangeRate) -> Result<Money> {
        if rate.from != self.currency {
            return Err(PriceError::CurrencyMismatch {
                expected: rate.from,
                actual: self.currency,
            });
        }
        Ok(Money::new(self.amount * rate.rate, rate.to))
    }

    /// Formats the amount rounded to whole units with its symbol, e.g. `1234₽`.
    pub fn rounded(&self) -> String {
        format!("{}{}", self.amount.round() as i64, self.currency.symbol())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// A conversion rate between two currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
}

impl ExchangeRate {
    /// Creates a rate, rejecting zero, negative and non-finite values.
    pub fn new(from: CurrencyCode, to: CurrencyCode, rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PriceError::InvalidRate(rate));
        }
        Ok(Self { from, to, rate })
    }

    /// The identity rate for a currency.
    pub fn identity(currency: CurrencyCode) -> Self {
        Self { from: currency, to: currency, rate: 1.0 }
    }

    /// Returns the rate for the opposite direction.
    pub fn inverse(&self) -> Self {
        Self { from: self.to, to: self.from, rate: 1.0 / self.rate }
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {:.5} {}", self.from, self.rate, self.to)
    }
}
