//! Timestamped JSON snapshots of a run, for later analysis.

use crate::catalog::Selection;
use crate::market::Wear;
use crate::ranking::Report;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotFilters {
    pub wear: String,
    pub stattrak: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotItem {
    pub name: String,
    pub base_name: String,
    pub wear: Option<Wear>,
    pub stattrak: bool,
    pub price: String,
    pub price_numeric: Option<f64>,
    pub listings: u64,
}

/// One saved run.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(skip)]
    pub taken_at: DateTime<Local>,
    pub timestamp: String,
    pub source: String,
    pub filters: SnapshotFilters,
    pub total_listings: u64,
    pub total_items: usize,
    pub items: Vec<SnapshotItem>,
}

impl Snapshot {
    /// Builds a snapshot of `report` taken at `taken_at`.
    pub fn new(report: &Report, selection: &Selection, taken_at: DateTime<Local>) -> Self {
        let items = report
            .results
            .iter()
            .map(|r| SnapshotItem {
                name: r.name.clone(),
                base_name: r.base_name(),
                wear: r.wear(),
                stattrak: r.is_stattrak(),
                price: r.quote.to_string(),
                price_numeric: r.price(),
                listings: r.listings.count_or_zero(),
            })
            .collect();

        Self {
            taken_at,
            timestamp: taken_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            source: report.source.clone(),
            filters: SnapshotFilters {
                wear: selection.wear.to_string(),
                stattrak: selection.stattrak.to_string(),
            },
            total_listings: report.total_listings(),
            total_items: report.total_items(),
            items,
        }
    }

    /// File name such as `steam_market_data_20251024_143000.json`.
    pub fn file_name(&self) -> String {
        format!("{}_market_data_{}.json", self.source, self.taken_at.format("%Y%m%d_%H%M%S"))
    }

    /// Writes the snapshot as pretty JSON into `dir`, creating it if needed.
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;

        info!("Saved snapshot with {} items to {}", self.total_items, path.display());
        Ok(path)
    }
}

/// Saves a snapshot of `report` taken now and returns its path.
pub fn save(report: &Report, selection: &Selection, dir: impl AsRef<Path>) -> Result<PathBuf> {
    Snapshot::new(report, selection, Local::now()).write(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{ItemResult, Listings, MarketQuote, StatTrakMode, WearSelection};
    use crate::price::PriceNormalizer;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn make_report() -> Report {
        let normalizer = PriceNormalizer::default();
        Report::new(
            "steam",
            vec![
                ItemResult::new(
                    "StatTrak™ AK-47 | Asiimov (Field-Tested)",
                    MarketQuote::new(Some("123,45€".into()), Listings::Count(42)),
                    &normalizer,
                ),
                ItemResult::new("★ Karambit | Fade", MarketQuote::unknown(), &normalizer),
            ],
            10,
        )
    }

    fn taken_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, 24, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_snapshot_fields() {
        let selection = Selection::new(WearSelection::All, StatTrakMode::Both);
        let snapshot = Snapshot::new(&make_report(), &selection, taken_at());

        assert_eq!(snapshot.timestamp, "2025-10-24T14:30:00");
        assert_eq!(snapshot.file_name(), "steam_market_data_20251024_143000.json");
        assert_eq!(snapshot.filters, SnapshotFilters { wear: "all".into(), stattrak: "both".into() });
        assert_eq!(snapshot.total_listings, 42);
        assert_eq!(snapshot.total_items, 2);

        let first = &snapshot.items[0];
        assert_eq!(first.base_name, "AK-47 | Asiimov");
        assert_eq!(first.wear, Some(Wear::FieldTested));
        assert!(first.stattrak);
        assert_eq!(first.price, "123,45€");
        assert_eq!(first.price_numeric, Some(123.45));
        assert_eq!(first.listings, 42);

        let second = &snapshot.items[1];
        assert_eq!(second.wear, None);
        assert!(!second.stattrak);
        assert_eq!(second.price, "N/A");
        assert_eq!(second.price_numeric, None);
        assert_eq!(second.listings, 0);
    }

    #[test]
    fn test_snapshot_write() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("market_data");
        let selection = Selection::default();

        let path = Snapshot::new(&make_report(), &selection, taken_at()).write(&data_dir).unwrap();
        assert_eq!(path, data_dir.join("steam_market_data_20251024_143000.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("StatTrak™ AK-47 | Asiimov (Field-Tested)"));

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["source"], "steam");
        assert_eq!(value["filters"]["wear"], "Field-Tested");
        assert_eq!(value["filters"]["stattrak"], "no");
        assert_eq!(value["items"][0]["wear"], "Field-Tested");
        assert_eq!(value["items"][1]["price_numeric"], serde_json::Value::Null);
        assert!(value.get("taken_at").is_none());
    }

    #[test]
    fn test_save_uses_current_time() {
        let dir = TempDir::new().unwrap();
        let path = save(&make_report(), &Selection::default(), dir.path()).unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("steam_market_data_"));
        assert!(file_name.ends_with(".json"));
    }
}
