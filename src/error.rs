//! Domain errors for parsing, fetching, converting and comparing prices.

use crate::pricing::money::CurrencyCode;
use thiserror::Error;

/// Errors raised by the pricing pipeline.
///
/// Every variant is local and non-fatal: callers skip the annotation for the
/// affected product and carry on with the rest.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("Unrecognized price text: {0:?}")]
    UnrecognizedPrice(String),

    #[error("Storefront request failed: {0}")]
    Fetch(String),

    #[error("No exchange rate available for {from} -> {to}")]
    RateUnavailable { from: CurrencyCode, to: CurrencyCode },

    #[error("Reference price is zero, percentage difference is undefined")]
    DivisionByZero,

    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: CurrencyCode, actual: CurrencyCode },

    #[error("Percentage difference out of range: {0}")]
    DifferenceOutOfRange(f64),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(f64),

    #[error("Invalid product reference: {0:?}")]
    InvalidProduct(String),
}

pub type Result<T> = std::result::Result<T, PriceError>;
