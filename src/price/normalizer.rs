//! Locale-agnostic price normalization.
//!
//! Market endpoints format prices according to the requested currency, so the same
//! amount can arrive as `1,234.56`, `1.234,56`, `1 234,56€` or `1234,--€`. The
//! normalizer turns all of them into a plain `f64` without knowing the locale up
//! front. It never fails: anything it cannot read becomes [`UNPARSEABLE`], which
//! sorts after every real price.

use super::quote::RawPrice;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Sentinel for prices that could not be read. Larger than any valid price.
pub const UNPARSEABLE: f64 = f64::INFINITY;

/// A digit followed by a dangling `,-` ("and zero cents"), unless a digit follows.
static DANGLING_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),-(\D|$)").expect("valid dangling dash pattern"));

/// First run of number-ish characters that starts with a digit.
static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d\s.,-]*").expect("valid number run pattern"));

/// How a number that contains commas but no dots is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeparatorRule {
    /// A single comma followed by exactly two digits is a decimal separator.
    /// Every other comma is a thousands separator (`1,234` is 1234).
    #[default]
    Strict,
    /// The last comma is always the decimal separator (`1,234` is 1.234).
    CommaDecimal,
}

impl FromStr for SeparatorRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SeparatorRule::Strict),
            "comma-decimal" | "comma" => Ok(SeparatorRule::CommaDecimal),
            _ => Err(format!("Unknown separator rule: {}. Use: strict, comma-decimal", s)),
        }
    }
}

impl fmt::Display for SeparatorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeparatorRule::Strict => write!(f, "strict"),
            SeparatorRule::CommaDecimal => write!(f, "comma-decimal"),
        }
    }
}

/// Converts raw market prices into comparable numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceNormalizer {
    rule: SeparatorRule,
}

impl PriceNormalizer {
    /// Creates a normalizer using the given comma rule.
    pub fn new(rule: SeparatorRule) -> Self {
        Self { rule }
    }

    /// Returns the active comma rule.
    pub fn rule(&self) -> SeparatorRule {
        self.rule
    }

    /// Normalizes an optional raw price. Absent input yields [`UNPARSEABLE`].
    pub fn normalize(&self, input: Option<&RawPrice>) -> f64 {
        match input {
            None => UNPARSEABLE,
            Some(RawPrice::Number(value)) => finite_or_sentinel(*value),
            Some(RawPrice::Text(text)) => self.normalize_text(text),
        }
    }

    /// Normalizes a price string such as `"1 577,29€"` or `"$4.15"`.
    pub fn normalize_text(&self, text: &str) -> f64 {
        // U+202F is the French thousands separator, treat it like NBSP.
        let text = text.replace(['\u{a0}', '\u{202f}'], " ");
        let text = text.trim();
        if text.is_empty() {
            return UNPARSEABLE;
        }

        let text = text.replace(",--", ",00").replace(".--", ".00");
        let text = DANGLING_DASH.replace_all(&text, "${1},00${2}");

        let Some(run) = NUMBER_RUN.find(&text) else {
            return UNPARSEABLE;
        };

        let compact: String = run.as_str().chars().filter(|c| !c.is_whitespace()).collect();
        let canonical = self.disambiguate(&compact);

        let cleaned: String =
            canonical.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

        cleaned.parse::<f64>().map(finite_or_sentinel).unwrap_or(UNPARSEABLE)
    }

    /// Rewrites decimal/thousands separators so that `.` is the only decimal point.
    fn disambiguate(&self, num: &str) -> String {
        let last_comma = num.rfind(',');
        let last_dot = num.rfind('.');

        match (last_comma, last_dot) {
            // Whichever separator comes last is the decimal one
            (Some(comma), Some(dot)) => {
                if dot > comma {
                    num.replace(',', "")
                } else {
                    num.replace('.', "").replace(',', ".")
                }
            }
            (Some(_), None) => self.comma_only(num),
            (None, Some(_)) if num.matches('.').count() > 1 => match num.rsplit_once('.') {
                Some((head, tail)) => format!("{}.{}", head.replace('.', ""), tail),
                None => num.to_string(),
            },
            _ => num.to_string(),
        }
    }

    fn comma_only(&self, num: &str) -> String {
        match self.rule {
            SeparatorRule::Strict => {
                if num.matches(',').count() == 1 {
                    if let Some((head, tail)) = num.split_once(',') {
                        if tail.len() == 2 && tail.chars().all(|c| c.is_ascii_digit()) {
                            return format!("{}.{}", head, tail);
                        }
                    }
                }
                num.replace(',', "")
            }
            SeparatorRule::CommaDecimal => match num.rsplit_once(',') {
                Some((head, tail)) => format!("{}.{}", head.replace(',', ""), tail),
                None => num.to_string(),
            },
        }
    }
}

fn finite_or_sentinel(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        UNPARSEABLE
    }
}

/// Normalizes an optional raw price with the default [`SeparatorRule::Strict`] rule.
pub fn normalize(input: Option<&RawPrice>) -> f64 {
    PriceNormalizer::default().normalize(input)
}

/// Normalizes a price string with the default rule.
pub fn normalize_str(text: &str) -> f64 {
    PriceNormalizer::default().normalize_text(text)
}
