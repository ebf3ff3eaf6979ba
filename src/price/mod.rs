//! Price values and the normalizer that makes them comparable.

pub mod normalizer;
pub mod quote;

pub use normalizer::{normalize, normalize_str, PriceNormalizer, SeparatorRule, UNPARSEABLE};
pub use quote::{PriceQuote, RawPrice};
