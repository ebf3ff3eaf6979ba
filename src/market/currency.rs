//! Steam wallet currencies supported for price lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency requested from the Steam market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Gbp,
    Eur,
}

impl Currency {
    /// Returns Steam's numeric currency id.
    pub fn steam_id(&self) -> u8 {
        match self {
            Currency::Usd => 1,
            Currency::Gbp => 2,
            Currency::Eur => 3,
        }
    }

    /// Returns the ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
        }
    }

    /// Returns the symbol Steam puts in formatted prices.
    pub fn symbol(&self) -> char {
        match self {
            Currency::Usd => '$',
            Currency::Gbp => '£',
            Currency::Eur => '€',
        }
    }

    /// Returns all supported currencies.
    pub fn all() -> &'static [Currency] {
        &[Currency::Usd, Currency::Gbp, Currency::Eur]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::Usd => "usd",
            Currency::Gbp => "gbp",
            Currency::Eur => "eur",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" | "1" | "$" => Ok(Currency::Usd),
            "gbp" | "2" | "£" => Ok(Currency::Gbp),
            "eur" | "3" | "€" => Ok(Currency::Eur),
            _ => Err(format!("Unknown currency: {}. Use: usd, gbp, eur", s)),
        }
    }
}
