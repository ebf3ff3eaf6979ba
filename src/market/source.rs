//! Pricing collaborator traits - enable mocking for tests.

use super::models::{MarketQuote, Variant};
use anyhow::Result;
use async_trait::async_trait;

/// Looks up the price of one full market name.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Returns the lowest price and listing count for a market name.
    ///
    /// Transient failures are retried internally; an exhausted retry policy yields
    /// [`MarketQuote::unknown`] rather than an error.
    async fn quote(&self, market_name: &str) -> Result<MarketQuote>;

    /// Short identifier used in logs and snapshot file names.
    fn source_name(&self) -> &'static str;
}

/// Finds every wear and StatTrak variant of a base name with a single request.
#[async_trait]
pub trait VariantSearch: Send + Sync {
    /// Returns all variants whose market name contains `base_name`.
    async fn variants(&self, base_name: &str) -> Result<Vec<Variant>>;

    /// Short identifier used in logs and snapshot file names.
    fn source_name(&self) -> &'static str;
}
