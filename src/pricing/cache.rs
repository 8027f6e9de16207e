//! Session-scoped cache of regional prices.

use super::money::Money;
use crate::steam::models::ProductRef;
use crate::steam::regions::Region;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Outcome of a regional price lookup. Every variant is cacheable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RegionalPrice {
    Priced(Money),
    Free,
    /// No price for this region (not sold, delisted, or the lookup failed).
    Unavailable,
}

impl RegionalPrice {
    /// Returns the price if there is one.
    pub fn money(&self) -> Option<Money> {
        match self {
            RegionalPrice::Priced(money) => Some(*money),
            _ => None,
        }
    }
}

/// Write-once cache keyed by `(product, region)`.
///
/// The lock is only held for a single lookup or insert, never across a
/// network call.
#[derive(Debug, Default)]
pub struct PriceCache {
    entries: Mutex<HashMap<(ProductRef, Region), RegionalPrice>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<(ProductRef, Region), RegionalPrice>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, product: &ProductRef, region: Region) -> Option<RegionalPrice> {
        self.entries().get(&(product.clone(), region)).copied()
    }

    /// Stores `price` unless the key is already present; returns the value now cached.
    pub fn set_if_absent(
        &self,
        product: &ProductRef,
        region: Region,
        price: RegionalPrice,
    ) -> RegionalPrice {
        *self.entries().entry((product.clone(), region)).or_insert(price)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
