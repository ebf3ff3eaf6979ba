//! Raw and normalized price values.

use super::normalizer::{PriceNormalizer, UNPARSEABLE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₽', '₴', '₩', '₹'];

/// A price exactly as a market returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// Already in major currency units (CSFloat cents divided by 100).
    Number(f64),
    /// Locale-formatted text such as `"1 577,29€"`.
    Text(String),
}

impl RawPrice {
    /// Returns the first currency symbol found in a text price.
    pub fn currency_hint(&self) -> Option<char> {
        match self {
            RawPrice::Number(_) => None,
            RawPrice::Text(text) => text.chars().find(|c| CURRENCY_SYMBOLS.contains(c)),
        }
    }
}

impl From<&str> for RawPrice {
    fn from(text: &str) -> Self {
        RawPrice::Text(text.to_string())
    }
}

impl From<String> for RawPrice {
    fn from(text: String) -> Self {
        RawPrice::Text(text)
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawPrice::Number(value) => write!(f, "{:.2}", value),
            RawPrice::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A raw price together with its normalized value.
///
/// `numeric` is derived from `raw` and is either a finite non-negative number or
/// [`UNPARSEABLE`]. It serializes as `null` in the latter case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub raw: Option<RawPrice>,
    pub currency_hint: Option<char>,
    pub numeric: f64,
}

impl PriceQuote {
    /// Normalizes `raw` with the given normalizer.
    pub fn new(raw: Option<RawPrice>, normalizer: &PriceNormalizer) -> Self {
        let numeric = normalizer.normalize(raw.as_ref());
        let currency_hint = raw.as_ref().and_then(RawPrice::currency_hint);
        Self { raw, currency_hint, numeric }
    }

    /// A quote with no price at all.
    pub fn unknown() -> Self {
        Self { raw: None, currency_hint: None, numeric: UNPARSEABLE }
    }

    /// Returns true if the raw value produced a usable number.
    pub fn is_parsed(&self) -> bool {
        self.numeric.is_finite()
    }

    /// Returns the numeric value, or None for unparseable quotes.
    pub fn value(&self) -> Option<f64> {
        self.is_parsed().then_some(self.numeric)
    }

    /// Orders quotes by numeric value; unparseable quotes compare greatest.
    pub fn cmp_price(&self, other: &Self) -> Ordering {
        self.numeric.total_cmp(&other.numeric)
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{}", raw),
            None => write!(f, "N/A"),
        }
    }
}
