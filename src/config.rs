//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::market::{Currency, RetryPolicy};
use crate::price::{PriceNormalizer, SeparatorRule};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Steam app id (730 = Counter-Strike 2)
    #[serde(default = "default_app_id")]
    pub app_id: u32,

    /// Currency requested from Steam
    #[serde(default)]
    pub currency: Currency,

    /// Item catalog, one base name per line
    #[serde(default = "default_item_file")]
    pub item_file: PathBuf,

    /// Directory for JSON snapshots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Cookie header sent to CSFloat
    #[serde(default)]
    pub csfloat_cookie: Option<String>,

    /// Base delay between items in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Number of cheapest items to list
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// How a lone comma is read by the price normalizer
    #[serde(default)]
    pub separator_rule: SeparatorRule,

    /// Write a snapshot after each run
    #[serde(default = "default_save_snapshot")]
    pub save_snapshot: bool,

    /// Filter: minimum price
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Filter: maximum price
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Retry policy for Steam requests
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Retry policy for CSFloat requests; derived from `retry` when absent
    #[serde(default)]
    pub csfloat_retry: Option<RetryPolicy>,
}

fn default_app_id() -> u32 {
    730
}

fn default_item_file() -> PathBuf {
    PathBuf::from("covert_items.txt")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("market_data")
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_delay_jitter_ms() -> u64 {
    2000
}

fn default_top_n() -> usize {
    10
}

fn default_save_snapshot() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            currency: Currency::Usd,
            item_file: default_item_file(),
            data_dir: default_data_dir(),
            proxy: None,
            csfloat_cookie: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            top_n: default_top_n(),
            format: OutputFormat::Table,
            separator_rule: SeparatorRule::Strict,
            save_snapshot: default_save_snapshot(),
            min_price: None,
            max_price: None,
            retry: RetryPolicy::default(),
            csfloat_retry: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("covert-finder").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(currency) = std::env::var("CF_CURRENCY") {
            if let Ok(c) = currency.parse() {
                self.currency = c;
            }
        }

        if let Ok(proxy) = std::env::var("CF_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("CF_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(item_file) = std::env::var("CF_ITEM_FILE") {
            self.item_file = PathBuf::from(item_file);
        }

        if let Ok(cookie) = std::env::var("CSFLOAT_COOKIE") {
            self.csfloat_cookie = Some(cookie);
        }

        self
    }

    /// Builds the price normalizer for the configured separator rule.
    pub fn normalizer(&self) -> PriceNormalizer {
        PriceNormalizer::new(self.separator_rule)
    }

    /// Retry policy for CSFloat. CSFloat throttles harder, so the default adds up to
    /// ten seconds of jitter on top of the Steam policy.
    pub fn csfloat_retry(&self) -> RetryPolicy {
        self.csfloat_retry
            .clone()
            .unwrap_or_else(|| RetryPolicy { jitter_ms: 10_000, ..self.retry.clone() })
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
