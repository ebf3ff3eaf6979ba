//! CSFloat marketplace client.

use super::http::{self, JSON_ACCEPT};
use super::models::{Listings, MarketQuote};
use super::retry::RetryPolicy;
use super::source::PriceSource;
use crate::config::Config;
use crate::price::RawPrice;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use wreq::{Client, RequestBuilder};
use wreq_util::Emulation;

const CSFLOAT_BASE: &str = "https://csfloat.com";

/// Listings fetched per item; the cheapest buy-now offer is almost always in the first page.
const PAGE_LIMIT: u32 = 50;

/// The listings endpoint has answered with a bare array and with wrapped objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingsResponse {
    Bare(Vec<Listing>),
    Wrapped {
        #[serde(default)]
        data: Option<Vec<Listing>>,
        #[serde(default)]
        results: Option<Vec<Listing>>,
    },
}

impl ListingsResponse {
    fn into_listings(self) -> Vec<Listing> {
        match self {
            ListingsResponse::Bare(listings) => listings,
            ListingsResponse::Wrapped { data, results } => data.or(results).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    /// Price in cents
    price: Option<u64>,
}

impl Listing {
    fn is_buy_now(&self) -> bool {
        self.kind.as_deref() == Some("buy_now")
    }
}

/// Picks the cheapest buy-now price (in dollars) and counts all listings.
fn summarize(listings: &[Listing]) -> MarketQuote {
    if listings.is_empty() {
        return MarketQuote::not_found();
    }

    let lowest = listings
        .iter()
        .filter(|l| l.is_buy_now())
        .filter_map(|l| l.price)
        .min()
        .map(|cents| RawPrice::Number(cents as f64 / 100.0));

    MarketQuote::new(lowest, Listings::Count(listings.len() as u64))
}

/// CSFloat HTTP client. Prices are always in USD.
pub struct CsFloatClient {
    client: Client,
    base_url: String,
    cookie: Option<String>,
    retry: RetryPolicy,
}

impl CsFloatClient {
    /// Creates a new CSFloat client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, CSFLOAT_BASE.to_string())
    }

    /// Creates a new CSFloat client with a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url,
            cookie: config.csfloat_cookie.clone(),
            retry: config.csfloat_retry(),
        })
    }

    fn listings_url(&self, market_name: &str) -> String {
        format!(
            "{}/api/v1/listings?limit={}&market_hash_name={}",
            self.base_url,
            PAGE_LIMIT,
            urlencoding::encode(market_name)
        )
    }

    fn request(&self, url: &str) -> RequestBuilder {
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", JSON_ACCEPT)
            .header("Referer", format!("{}/", self.base_url));

        if let Some(cookie) = &self.cookie {
            request = request.header("Cookie", cookie);
        }

        request
    }
}

#[async_trait]
impl PriceSource for CsFloatClient {
    async fn quote(&self, market_name: &str) -> Result<MarketQuote> {
        let url = self.listings_url(market_name);
        let url = url.as_str();
        let this = self;

        info!("Fetching CSFloat price: {}", market_name);

        let response = this
            .retry
            .run(market_name, move || async move {
                http::get_json::<ListingsResponse>(this.request(url)).await
            })
            .await;

        match response {
            Ok(response) => Ok(summarize(&response.into_listings())),
            Err(_) => Ok(MarketQuote::unknown()),
        }
    }

    fn source_name(&self) -> &'static str {
        "csfloat"
    }
}
