//! One market search per base name, covering every wear and StatTrak variant.

use super::{finish, Pacer};
use crate::catalog::{load_catalog, Selection};
use crate::config::Config;
use crate::filters::{FilterChain, FilterChainBuilder};
use crate::format::Formatter;
use crate::market::{ItemResult, SteamClient, VariantSearch};
use crate::ranking::Report;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Searches each catalog base name once and keeps the variants matching the selection.
pub struct VariantsCommand {
    config: Config,
    selection: Selection,
}

impl VariantsCommand {
    /// Creates a new variants command.
    pub fn new(config: Config, selection: Selection) -> Self {
        Self { config, selection }
    }

    /// Executes the search against the Steam market.
    pub async fn execute(&self) -> Result<String> {
        let client = SteamClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_search(&client).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_search(&self, search: &impl VariantSearch) -> Result<String> {
        let base_names = load_catalog(&self.config.item_file)?;
        eprintln!(
            "Loaded {} base items from {} ({})",
            base_names.len(),
            self.config.item_file.display(),
            self.selection
        );

        let report = self.collect(search, &base_names).await;

        let filters = FilterChainBuilder::new()
            .price_range(self.config.min_price, self.config.max_price)
            .build();

        Ok(finish(&self.config, &self.selection, report, &filters))
    }

    fn selection_filters(&self) -> FilterChain {
        FilterChainBuilder::new()
            .wear(self.selection.wear)
            .stattrak(self.selection.stattrak)
            .build()
    }

    /// Searches every base name in order and keeps the selected variants.
    pub async fn collect(&self, search: &impl VariantSearch, base_names: &[String]) -> Report {
        let normalizer = self.config.normalizer();
        let pacer = Pacer::from_config(&self.config);
        let filters = self.selection_filters();
        let mut results = Vec::new();

        info!("Searching {} base names on {}", base_names.len(), search.source_name());

        for (i, base_name) in base_names.iter().enumerate() {
            if i > 0 {
                pacer.wait().await;
            }

            let variants = match search.variants(base_name).await {
                Ok(variants) => variants,
                Err(e) => {
                    warn!("Variant search failed for {}: {:#}", base_name, e);
                    continue;
                }
            };

            let found = variants.len();
            let mut kept = 0;
            for variant in variants {
                let item = ItemResult::new(variant.name, variant.quote, &normalizer);
                if !filters.matches(&item) {
                    continue;
                }
                eprintln!("{}", Formatter::progress_line(&item));
                results.push(item);
                kept += 1;
            }
            debug!("{}: kept {} of {} variants", base_name, kept, found);
        }

        Report::new(search.source_name(), results, self.config.top_n)
    }
}
