//! Market naming, quotes and the HTTP pricing sources.

pub mod csfloat;
pub mod currency;
pub mod http;
pub mod models;
pub mod retry;
pub mod source;
pub mod steam;
pub mod wear;

pub use csfloat::CsFloatClient;
pub use currency::Currency;
pub use models::{decorate, ItemResult, Listings, MarketQuote, Variant, STATTRAK_MARKER};
pub use retry::{jittered, FetchError, RetryPolicy};
pub use source::{PriceSource, VariantSearch};
pub use steam::SteamClient;
pub use wear::{StatTrakMode, Wear, WearSelection};
