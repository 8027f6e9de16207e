//! Cached regional price lookups on top of a [`Storefront`].

use super::cache::{PriceCache, RegionalPrice};
use super::money::{CurrencyCode, Money};
use crate::steam::client::Storefront;
use crate::steam::models::{ProductEnvelope, ProductRef};
use crate::steam::regions::Region;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches regional prices, remembering every outcome for the session.
pub struct RegionalPriceFetcher<S> {
    storefront: S,
    cache: Arc<PriceCache>,
}

impl<S: Storefront> RegionalPriceFetcher<S> {
    pub fn new(storefront: S, cache: Arc<PriceCache>) -> Self {
        Self { storefront, cache }
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Returns the price of `product` in `region`.
    ///
    /// Never fails: request and decoding errors are logged and cached as
    /// [`RegionalPrice::Unavailable`], and are not retried for this session.
    pub async fn fetch(&self, product: &ProductRef, region: Region) -> RegionalPrice {
        if let Some(cached) = self.cache.get(product, region) {
            debug!("Cache hit for {} in {}: {:?}", product, region, cached);
            return cached;
        }

        let price = match self.storefront.details(product, region).await {
            Ok(Some(envelope)) => interpret(product, &envelope),
            Ok(None) => {
                debug!("No entry for {} in {} response", product, region);
                RegionalPrice::Unavailable
            }
            Err(e) => {
                warn!("Failed to fetch {} price in {}: {:#}", product, region, e);
                RegionalPrice::Unavailable
            }
        };

        self.cache.set_if_absent(product, region, price)
    }
}

/// Maps a storefront envelope to a price outcome.
fn interpret(product: &ProductRef, envelope: &ProductEnvelope) -> RegionalPrice {
    if !envelope.success {
        return RegionalPrice::Unavailable;
    }

    let Some(data) = envelope.details() else {
        return RegionalPrice::Unavailable;
    };

    // Free products carry no price block
    if data.is_free == Some(true) {
        return RegionalPrice::Free;
    }

    let Some(overview) = data.price_overview else {
        return RegionalPrice::Unavailable;
    };

    match overview.currency.parse::<CurrencyCode>() {
        Ok(currency) if overview.final_price >= 0 => {
            RegionalPrice::Priced(Money::from_minor_units(overview.final_price, currency))
        }
        Ok(_) => {
            warn!("Negative price {} for {}", overview.final_price, product);
            RegionalPrice::Unavailable
        }
        Err(e) => {
            warn!("{} (product {})", e, product);
            RegionalPrice::Unavailable
        }
    }
}
