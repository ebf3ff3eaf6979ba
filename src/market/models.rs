//! Market names, quotes and per-item results.

use super::wear::Wear;
use crate::price::{PriceNormalizer, PriceQuote, RawPrice};
use serde::{Serialize, Serializer};
use std::fmt;

/// Marker Steam puts in front of StatTrak item names.
pub const STATTRAK_MARKER: &str = "StatTrak™";

/// Builds a full market name from a catalog base name.
///
/// Adds the StatTrak prefix when requested and not already present, and appends the
/// wear suffix unless the name already carries one in parentheses.
pub fn decorate(base_name: &str, wear: Option<Wear>, stattrak: bool) -> String {
    let mut name = base_name.trim().to_string();

    if stattrak && !name.starts_with(STATTRAK_MARKER) {
        name = format!("{} {}", STATTRAK_MARKER, name);
    }

    if let Some(wear) = wear {
        if !name.contains('(') && !name.contains(')') {
            name = format!("{} {}", name, wear.suffix());
        }
    }

    name
}

/// Returns true if the market name is a StatTrak variant.
pub fn is_stattrak(name: &str) -> bool {
    name.contains(STATTRAK_MARKER)
}

/// Strips the StatTrak prefix and the wear suffix from a market name.
pub fn base_name(name: &str) -> String {
    let mut base = name.replace(&format!("{} ", STATTRAK_MARKER), "");
    if let Some(wear) = Wear::from_market_name(&base) {
        base = base.replace(&format!(" {}", wear.suffix()), "");
    }
    base
}

/// Number of active listings for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listings {
    Count(u64),
    #[default]
    Unknown,
}

impl Listings {
    /// Returns the count, treating unknown as zero.
    pub fn count_or_zero(&self) -> u64 {
        match self {
            Listings::Count(n) => *n,
            Listings::Unknown => 0,
        }
    }
}

impl From<Option<u64>> for Listings {
    fn from(count: Option<u64>) -> Self {
        count.map(Listings::Count).unwrap_or(Listings::Unknown)
    }
}

impl fmt::Display for Listings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listings::Count(n) => write!(f, "{}", n),
            Listings::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for Listings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Listings::Count(n) => serializer.serialize_u64(*n),
            Listings::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// What a pricing source reports for one market name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketQuote {
    pub price: Option<RawPrice>,
    pub listings: Listings,
}

impl MarketQuote {
    /// Creates a quote with a price and listing count.
    pub fn new(price: Option<RawPrice>, listings: Listings) -> Self {
        Self { price, listings }
    }

    /// The item exists but nobody is selling it.
    pub fn not_found() -> Self {
        Self { price: None, listings: Listings::Count(0) }
    }

    /// The source gave up before getting an answer.
    pub fn unknown() -> Self {
        Self { price: None, listings: Listings::Unknown }
    }
}

/// A full market name returned by a variant search together with its quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    pub quote: MarketQuote,
}

/// The outcome of pricing one market name during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResult {
    pub name: String,
    pub quote: PriceQuote,
    pub listings: Listings,
}

impl ItemResult {
    /// Normalizes a market quote into an item result.
    pub fn new(name: impl Into<String>, quote: MarketQuote, normalizer: &PriceNormalizer) -> Self {
        Self {
            name: name.into(),
            quote: PriceQuote::new(quote.price, normalizer),
            listings: quote.listings,
        }
    }

    /// Returns the wear parsed from the name suffix.
    pub fn wear(&self) -> Option<Wear> {
        Wear::from_market_name(&self.name)
    }

    /// Returns true if this is a StatTrak item.
    pub fn is_stattrak(&self) -> bool {
        is_stattrak(&self.name)
    }

    /// Returns the name without StatTrak prefix and wear suffix.
    pub fn base_name(&self) -> String {
        base_name(&self.name)
    }

    /// Returns the normalized price, or None when it could not be read.
    pub fn price(&self) -> Option<f64> {
        self.quote.value()
    }
}
