//! Steam storefront modules: HTTP client, API models and regions.

pub mod client;
pub mod models;
pub mod regions;

pub use client::{SteamClient, Storefront, STEAM_STORE_BASE};
pub use models::{ProductKind, ProductRef};
pub use regions::Region;
