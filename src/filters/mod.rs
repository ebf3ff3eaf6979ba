//! Item filtering system with composable filters.

pub mod price;
pub mod variant;

use crate::market::{ItemResult, StatTrakMode, WearSelection};

pub use price::PriceFilter;
pub use variant::{StatTrakFilter, WearFilter};

/// Trait for filtering priced items.
pub trait Filter: Send + Sync {
    /// Returns true if the item passes the filter.
    fn matches(&self, item: &ItemResult) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if an item passes all filters.
    pub fn matches(&self, item: &ItemResult) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    /// Filters a collection of items, keeping their order.
    pub fn apply(&self, items: Vec<ItemResult>) -> Vec<ItemResult> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a wear filter unless every wear is selected.
    pub fn wear(mut self, selection: WearSelection) -> Self {
        if selection != WearSelection::All {
            self.chain.add(WearFilter::new(selection));
        }
        self
    }

    /// Adds a StatTrak filter unless both kinds are wanted.
    pub fn stattrak(mut self, mode: StatTrakMode) -> Self {
        if mode != StatTrakMode::Both {
            self.chain.add(StatTrakFilter::new(mode));
        }
        self
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
