//! Shared wreq client setup and JSON fetching.

use super::retry::FetchError;
use crate::config::Config;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use wreq::{Client, RequestBuilder};

/// Accept header the market web frontends send for their XHR calls.
pub const JSON_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Builds an HTTP client with cookies, compression, timeouts and optional proxy.
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(10));

    if let Some(proxy_url) = &config.proxy {
        debug!("Configuring proxy: {}", proxy_url);
        let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
        builder = builder.proxy(proxy);
    }

    builder.build().context("Failed to build HTTP client")
}

/// Sends a request and decodes a JSON body, classifying failures for the retry policy.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request.send().await.map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    debug!("Response status: {}", status);

    if status.as_u16() == 429 {
        return Err(FetchError::RateLimited);
    }

    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await.map_err(|e| FetchError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
}
