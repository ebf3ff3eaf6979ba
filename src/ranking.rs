//! Ranking of priced items and the summary of a run.

use crate::market::ItemResult;
use serde::Serialize;

/// Sorts items by normalized price, cheapest first.
///
/// The sort is stable, so items with equal prices (including every unparseable one)
/// keep their lookup order, and unparseable prices always end up last.
pub fn rank(mut items: Vec<ItemResult>) -> Vec<ItemResult> {
    items.sort_by(|a, b| a.quote.cmp_price(&b.quote));
    items
}

/// Everything a finished run produced, in lookup order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub results: Vec<ItemResult>,
    pub top_n: usize,
}

impl Report {
    pub fn new(source: impl Into<String>, results: Vec<ItemResult>, top_n: usize) -> Self {
        Self { source: source.into(), results, top_n }
    }

    /// Number of items that were looked up.
    pub fn total_items(&self) -> usize {
        self.results.len()
    }

    /// Sum of listing counts; unknown counts add nothing.
    pub fn total_listings(&self) -> u64 {
        self.results.iter().map(|r| r.listings.count_or_zero()).sum()
    }

    /// Number of items whose price could be read.
    pub fn priced_items(&self) -> usize {
        self.results.iter().filter(|r| r.quote.is_parsed()).count()
    }

    /// All results sorted by price.
    pub fn ranked(&self) -> Vec<ItemResult> {
        rank(self.results.clone())
    }

    /// The `top_n` cheapest results.
    pub fn cheapest(&self) -> Vec<ItemResult> {
        let mut ranked = self.ranked();
        ranked.truncate(self.top_n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{Listings, MarketQuote};
    use crate::price::PriceNormalizer;

    fn item(name: &str, price: Option<&str>, listings: Listings) -> ItemResult {
        let quote = MarketQuote::new(price.map(Into::into), listings);
        ItemResult::new(name, quote, &PriceNormalizer::default())
    }

    fn names(items: &[ItemResult]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_rank_ascending_with_unparseable_last() {
        let items = vec![
            item("a", Some("N/A"), Listings::Unknown),
            item("b", Some("$12.00"), Listings::Count(1)),
            item("c", None, Listings::Count(0)),
            item("d", Some("1,50€"), Listings::Count(4)),
            item("e", Some("$1,200.00"), Listings::Count(2)),
        ];

        let ranked = rank(items);
        assert_eq!(names(&ranked), vec!["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let items = vec![
            item("first", Some("$3.00"), Listings::Count(1)),
            item("second", Some("3,00€"), Listings::Count(1)),
            item("third", Some("$3"), Listings::Count(1)),
        ];

        assert_eq!(names(&rank(items)), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_report_totals() {
        let report = Report::new(
            "steam",
            vec![
                item("a", Some("$2.00"), Listings::Count(10)),
                item("b", Some("N/A"), Listings::Unknown),
                item("c", Some("$1.00"), Listings::Count(5)),
            ],
            10,
        );

        assert_eq!(report.total_items(), 3);
        assert_eq!(report.total_listings(), 15);
        assert_eq!(report.priced_items(), 2);
        assert_eq!(names(&report.ranked()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_report_cheapest_truncates() {
        let results = (1..=15)
            .rev()
            .map(|n| item(&format!("item {}", n), Some(format!("${}.00", n).as_str()), Listings::Count(1)))
            .collect();
        let report = Report::new("csfloat", results, 10);

        let cheapest = report.cheapest();
        assert_eq!(cheapest.len(), 10);
        assert_eq!(cheapest[0].name, "item 1");
        assert_eq!(cheapest[9].name, "item 10");
        assert_eq!(report.results[0].name, "item 15");
    }

    #[test]
    fn test_report_empty() {
        let report = Report::new("steam", Vec::new(), 10);
        assert_eq!(report.total_items(), 0);
        assert_eq!(report.total_listings(), 0);
        assert!(report.cheapest().is_empty());
    }
}
