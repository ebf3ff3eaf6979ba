//! covert-finder - Rank the cheapest Counter-Strike items on the Steam and CSFloat markets
//!
//! Prices a catalog of item names, normalizes locale-formatted price strings into
//! comparable numbers and prints the cheapest items.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod market;
pub mod price;
pub mod prompt;
pub mod ranking;
pub mod snapshot;

pub use catalog::Selection;
pub use config::Config;
pub use market::{ItemResult, Listings, MarketQuote};
pub use price::{normalize, normalize_str, PriceNormalizer, PriceQuote, RawPrice, SeparatorRule, UNPARSEABLE};
pub use ranking::{rank, Report};
