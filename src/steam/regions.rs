//! Steam storefront regions and their currencies.

use crate::pricing::money::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storefront regions, selected with the `cc` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Ru,
    Kz,
    Us,
    De,
}

impl Region {
    /// Returns the country code sent as `cc`.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Ru => "ru",
            Region::Kz => "kz",
            Region::Us => "us",
            Region::De => "de",
        }
    }

    /// Returns the storefront currency for this region.
    pub fn currency(&self) -> CurrencyCode {
        match self {
            Region::Ru => CurrencyCode::Rub,
            Region::Kz => CurrencyCode::Kzt,
            Region::Us => CurrencyCode::Usd,
            Region::De => CurrencyCode::Eur,
        }
    }

    /// Returns the region whose storefront prices in `currency`.
    pub fn from_currency(currency: CurrencyCode) -> Self {
        match currency {
            CurrencyCode::Rub => Region::Ru,
            CurrencyCode::Kzt => Region::Kz,
            CurrencyCode::Usd => Region::Us,
            CurrencyCode::Eur => Region::De,
        }
    }

    /// Returns the human-readable country name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::Ru => "Russia",
            Region::Kz => "Kazakhstan",
            Region::Us => "United States",
            Region::De => "Germany (EUR)",
        }
    }

    /// Returns the short label used in annotations, e.g. `KZ`.
    pub fn label(&self) -> String {
        self.code().to_uppercase()
    }

    /// Returns all supported regions.
    pub fn all() -> &'static [Region] {
        &[Region::Ru, Region::Kz, Region::Us, Region::De]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" | "russia" => Ok(Region::Ru),
            "kz" | "kazakhstan" => Ok(Region::Kz),
            "us" | "usa" | "united states" => Ok(Region::Us),
            "de" | "eu" | "germany" => Ok(Region::De),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown region '{}'. Valid regions: ru, kz, us, de", self.0)
    }
}

impl std::error::Error for RegionParseError {}
