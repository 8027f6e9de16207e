//! Price parsing, caching, fetching and comparison.

pub mod cache;
pub mod compare;
pub mod fetcher;
pub mod money;
pub mod parser;
pub mod pipeline;

pub use cache::{PriceCache, RegionalPrice};
pub use compare::{compare, CheaperSide, ComparisonResult};
pub use fetcher::RegionalPriceFetcher;
pub use money::{CurrencyCode, ExchangeRate, Money};
pub use parser::{convert_text, parse_price};
pub use pipeline::{ComparisonReport, Outcome, PricePipeline};
