//! Product references and storefront API response models.

use crate::error::{PriceError, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static STORE_URL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(app|sub|package|bundle)/(\d+)").unwrap());

/// What kind of storefront item a [`ProductRef`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    App,
    Package,
}

/// A storefront product, resolved from a URL or an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRef {
    pub kind: ProductKind,
    pub id: String,
}

impl ProductRef {
    /// Creates an app reference.
    pub fn app(id: impl Into<String>) -> Self {
        Self { kind: ProductKind::App, id: id.into() }
    }

    /// Creates a package (sub) reference.
    pub fn package(id: impl Into<String>) -> Self {
        Self { kind: ProductKind::Package, id: id.into() }
    }

    /// Extracts a reference from a store URL such as
    /// `https://store.steampowered.com/app/570/Dota_2/`.
    pub fn from_url(url: &str) -> Option<Self> {
        let caps = STORE_URL_ID.captures(url)?;
        let id = caps[2].to_string();
        match &caps[1] {
            "app" => Some(Self::app(id)),
            "sub" | "package" => Some(Self::package(id)),
            // Bundles have no price endpoint
            _ => None,
        }
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProductKind::App => write!(f, "app/{}", self.id),
            ProductKind::Package => write!(f, "sub/{}", self.id),
        }
    }
}

impl FromStr for ProductRef {
    type Err = PriceError;

    /// Accepts a store URL, `app/<id>`, `sub/<id>` or a bare numeric app id.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Self::app(s));
        }

        let prefixed = format!("/{}", s.trim_start_matches('/'));
        ProductRef::from_url(s)
            .or_else(|| ProductRef::from_url(&prefixed))
            .ok_or_else(|| PriceError::InvalidProduct(s.to_string()))
    }
}

/// The `{ "<id>": { success, data } }` body of `appdetails` / `packagedetails`.
pub type DetailsResponse = HashMap<String, ProductEnvelope>;

/// Per-product envelope.
///
/// `data` is kept as raw JSON: the storefront sends `[]` instead of an object
/// when a filtered request has nothing to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ProductEnvelope {
    /// Returns the typed product data, if `data` is an object.
    pub fn details(&self) -> Option<ProductData> {
        match &self.data {
            Some(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }
}

/// Fields of the product data this crate reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub is_free: Option<bool>,
    /// `price_overview` for apps, `price` for packages.
    #[serde(default, alias = "price")]
    pub price_overview: Option<PriceOverview>,
}

/// Price block, all amounts in minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceOverview {
    pub currency: String,
    #[serde(default)]
    pub initial: Option<i64>,
    #[serde(rename = "final")]
    pub final_price: i64,
    #[serde(default)]
    pub discount_percent: Option<u8>,
    #[serde(default)]
    pub final_formatted: Option<String>,
}
