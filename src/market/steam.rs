//! Steam Community Market client.

use super::currency::Currency;
use super::http::{self, JSON_ACCEPT};
use super::models::{Listings, MarketQuote, Variant};
use super::retry::{FetchError, RetryPolicy};
use super::source::{PriceSource, VariantSearch};
use crate::config::Config;
use crate::price::RawPrice;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};
use wreq::{Client, RequestBuilder};
use wreq_util::Emulation;

const STEAM_BASE: &str = "https://steamcommunity.com";

/// Number of search results requested per base name, enough for every variant.
const SEARCH_COUNT: u32 = 100;

#[derive(Debug, Deserialize)]
struct PriceOverview {
    #[serde(default)]
    success: bool,
    lowest_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingRender {
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchRender {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    hash_name: String,
    sell_listings: Option<u64>,
    sell_price_text: Option<String>,
}

/// Steam market HTTP client with browser impersonation and retries.
pub struct SteamClient {
    client: Client,
    base_url: String,
    app_id: u32,
    currency: Currency,
    retry: RetryPolicy,
}

impl SteamClient {
    /// Creates a new Steam client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, STEAM_BASE.to_string())
    }

    /// Creates a new Steam client with a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url,
            app_id: config.app_id,
            currency: config.currency,
            retry: config.retry.clone(),
        })
    }

    fn request(&self, url: &str) -> RequestBuilder {
        debug!("GET {}", url);

        self.client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", JSON_ACCEPT)
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Referer", format!("{}/market/", self.base_url))
    }

    fn overview_url(&self, market_name: &str) -> String {
        format!(
            "{}/market/priceoverview/?appid={}&currency={}&market_hash_name={}",
            self.base_url,
            self.app_id,
            self.currency.steam_id(),
            urlencoding::encode(market_name)
        )
    }

    fn listings_url(&self, market_name: &str) -> String {
        format!(
            "{}/market/listings/{}/{}/render/?count=1&start=0",
            self.base_url,
            self.app_id,
            urlencoding::encode(market_name)
        )
    }

    fn search_url(&self, base_name: &str) -> String {
        format!(
            "{}/market/search/render/?appid={}&query={}&norender=1&currency={}&count={}",
            self.base_url,
            self.app_id,
            urlencoding::encode(base_name),
            self.currency.steam_id(),
            SEARCH_COUNT
        )
    }

    /// Fetches the active listing count. A single attempt; failures mean unknown.
    async fn listing_count(&self, market_name: &str) -> Listings {
        let url = self.listings_url(market_name);

        match http::get_json::<ListingRender>(self.request(&url)).await {
            Ok(render) => render.total_count.into(),
            Err(e) => {
                debug!("Listing count unavailable for {}: {}", market_name, e);
                Listings::Unknown
            }
        }
    }

    /// Returns the currency of a price formatted in something other than the requested one.
    fn foreign_currency(&self, price: &str) -> Option<Currency> {
        Currency::all()
            .iter()
            .copied()
            .find(|c| *c != self.currency && price.contains(c.symbol()))
    }

    /// Warns when Steam ignored the currency parameter.
    fn check_currency(&self, name: &str, price: &str) {
        if let Some(found) = self.foreign_currency(price) {
            warn!(
                "{} price detected for {}: {} (requested {}, API may be returning mixed currencies)",
                found.code(),
                name,
                price,
                self.currency.code()
            );
        }
    }
}

#[async_trait]
impl PriceSource for SteamClient {
    async fn quote(&self, market_name: &str) -> Result<MarketQuote> {
        let url = self.overview_url(market_name);
        let url = url.as_str();
        let this = self;

        info!("Fetching Steam price: {}", market_name);

        let overview = this
            .retry
            .run(market_name, move || async move {
                let overview: PriceOverview = http::get_json(this.request(url)).await?;
                if overview.success {
                    Ok(overview)
                } else {
                    Err(FetchError::Unsuccessful)
                }
            })
            .await;

        let Ok(overview) = overview else {
            return Ok(MarketQuote::unknown());
        };

        if let Some(price) = &overview.lowest_price {
            self.check_currency(market_name, price);
        }

        let listings = self.listing_count(market_name).await;
        Ok(MarketQuote::new(overview.lowest_price.map(RawPrice::Text), listings))
    }

    fn source_name(&self) -> &'static str {
        "steam"
    }
}

#[async_trait]
impl VariantSearch for SteamClient {
    async fn variants(&self, base_name: &str) -> Result<Vec<Variant>> {
        let url = self.search_url(base_name);
        let url = url.as_str();
        let this = self;

        info!("Searching Steam variants: {}", base_name);

        let render = this
            .retry
            .run(base_name, move || async move {
                http::get_json::<SearchRender>(this.request(url)).await
            })
            .await;

        let render = match render {
            Ok(render) if render.success => render,
            Ok(_) => {
                warn!("No variants found for {}", base_name);
                return Ok(Vec::new());
            }
            Err(_) => return Ok(Vec::new()),
        };

        let variants: Vec<Variant> = render
            .results
            .into_iter()
            .filter(|r| r.hash_name.contains(base_name))
            .map(|r| {
                if let Some(price) = &r.sell_price_text {
                    self.check_currency(&r.hash_name, price);
                }
                Variant {
                    quote: MarketQuote::new(
                        r.sell_price_text.map(RawPrice::Text),
                        r.sell_listings.into(),
                    ),
                    name: r.hash_name,
                }
            })
            .collect();

        if variants.is_empty() {
            warn!("No variants found for {}", base_name);
        } else {
            debug!("Found {} variants for {}", variants.len(), base_name);
        }

        Ok(variants)
    }

    fn source_name(&self) -> &'static str {
        "steam"
    }
}
