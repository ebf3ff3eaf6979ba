//! Per-name price lookups against Steam or CSFloat.

use super::{finish, Pacer};
use crate::catalog::{load_catalog, Selection};
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use crate::market::{CsFloatClient, ItemResult, MarketQuote, PriceSource, SteamClient};
use crate::ranking::Report;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Prices every decorated catalog name, one request at a time.
pub struct LookupCommand {
    config: Config,
    selection: Selection,
}

impl LookupCommand {
    /// Creates a new lookup command.
    pub fn new(config: Config, selection: Selection) -> Self {
        Self { config, selection }
    }

    /// Looks up prices on the Steam market.
    pub async fn execute_steam(&self) -> Result<String> {
        let client = SteamClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_source(&client).await
    }

    /// Looks up prices on CSFloat.
    pub async fn execute_csfloat(&self) -> Result<String> {
        let client = CsFloatClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_source(&client).await
    }

    /// Executes the lookup with a provided source (for testing).
    pub async fn execute_with_source(&self, source: &impl PriceSource) -> Result<String> {
        let base_names = load_catalog(&self.config.item_file)?;
        eprintln!(
            "Loaded {} items from {} ({})",
            base_names.len(),
            self.config.item_file.display(),
            self.selection
        );

        let names = self.selection.decorate(&base_names);
        let report = self.collect(source, &names).await;

        let filters = FilterChainBuilder::new()
            .price_range(self.config.min_price, self.config.max_price)
            .build();

        Ok(finish(&self.config, &self.selection, report, &filters))
    }

    /// Prices `names` in order, pausing between requests.
    ///
    /// A source error only marks that item as unknown; the batch always completes.
    pub async fn collect(&self, source: &impl PriceSource, names: &[String]) -> Report {
        let normalizer = self.config.normalizer();
        let pacer = Pacer::from_config(&self.config);
        let mut results = Vec::with_capacity(names.len());

        info!("Fetching {} prices from {}", names.len(), source.source_name());
        debug!("Reading prices with the {} separator rule", normalizer.rule());

        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                pacer.wait().await;
            }

            let quote = match source.quote(name).await {
                Ok(quote) => quote,
                Err(e) => {
                    warn!("Lookup failed for {}: {:#}", name, e);
                    MarketQuote::unknown()
                }
            };

            let item = ItemResult::new(name.as_str(), quote, &normalizer);
            eprintln!("{}", Formatter::progress_line(&item));
            results.push(item);
        }

        Report::new(source.source_name(), results, self.config.top_n)
    }
}
