//! steam-price-compare - Cross-region Steam price comparison
//!
//! Parses storefront prices, fetches the same product's price in another
//! region and reports the percentage difference in a common currency.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod pricing;
pub mod rates;
pub mod steam;

pub use config::Config;
pub use error::PriceError;
pub use pricing::{ComparisonReport, ComparisonResult, CurrencyCode, Money, RegionalPrice};
pub use steam::{ProductRef, Region};
