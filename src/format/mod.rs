//! Output formatting for run reports (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::market::{ItemResult, Listings};
use crate::ranking::Report;
use serde::Serialize;

const NAME_WIDTH: usize = 70;
const PRICE_WIDTH: usize = 10;

/// Formats reports for output.
pub struct Formatter {
    format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    total_items: usize,
    total_listings: u64,
    items: &'a [ItemResult],
    cheapest: Vec<ItemResult>,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a whole report.
    pub fn format_report(&self, report: &Report) -> String {
        if report.results.is_empty() {
            return match self.format {
                OutputFormat::Json => self.json_report(report),
                OutputFormat::Csv => self.csv_header(),
                _ => "No items checked.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_report(report),
            OutputFormat::Table => self.table_report(report),
            OutputFormat::Markdown => self.markdown_report(report),
            OutputFormat::Csv => self.csv_report(report),
        }
    }

    /// Formats the progress line printed after each lookup.
    pub fn progress_line(item: &ItemResult) -> String {
        format!("{} -> {} | Listings: {}", item.name, item.quote, item.listings)
    }

    // JSON formatting

    fn json_report(&self, report: &Report) -> String {
        let view = JsonReport {
            source: &report.source,
            total_items: report.total_items(),
            total_listings: report.total_listings(),
            items: &report.results,
            cheapest: report.cheapest(),
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_row(item: &ItemResult) -> String {
        format!(
            "{:<NAME_WIDTH$} | {:>PRICE_WIDTH$} | Listings: {}",
            truncate(&item.name, NAME_WIDTH),
            item.quote.to_string(),
            listings_cell(item.listings)
        )
    }

    fn table_report(&self, report: &Report) -> String {
        let rule = "=".repeat(NAME_WIDTH + PRICE_WIDTH + 16);
        let mut lines = Vec::new();

        lines.push(format!("Covert Items - Price Summary ({})", report.source));
        lines.push(rule.clone());

        for item in &report.results {
            lines.push(Self::table_row(item));
        }

        lines.push(String::new());
        lines.push(format!("Total items checked: {}", report.total_items()));
        lines.push(format!("Total listings: {}", report.total_listings()));

        lines.push(String::new());
        lines.push(format!("💰 Top {} Cheapest Items", report.top_n));
        lines.push(rule);

        for (i, item) in report.cheapest().iter().enumerate() {
            lines.push(format!("{:>2}. {}", i + 1, Self::table_row(item)));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_report(&self, report: &Report) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## Price Summary ({})", report.source));
        lines.push(String::new());
        lines.push("| Item | Price | Listings |".to_string());
        lines.push("|------|-------|----------|".to_string());

        for item in &report.results {
            lines.push(format!(
                "| {} | {} | {} |",
                item.name.replace('|', "\\|"),
                item.quote,
                listings_cell(item.listings)
            ));
        }

        lines.push(String::new());
        lines.push(format!("### Top {} Cheapest", report.top_n));
        lines.push(String::new());

        for (i, item) in report.cheapest().iter().enumerate() {
            lines.push(format!("{}. **{}** - {}", i + 1, item.name, item.quote));
        }

        lines.push(String::new());
        lines.push(format!(
            "*{} items checked, {} listings*",
            report.total_items(),
            report.total_listings()
        ));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "rank,name,price,price_numeric,currency,listings".to_string()
    }

    fn csv_report(&self, report: &Report) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for (i, item) in report.ranked().iter().enumerate() {
            let numeric = item.price().map(|p| p.to_string()).unwrap_or_default();
            let currency = item.quote.currency_hint.map(String::from).unwrap_or_default();
            let listings = match item.listings {
                Listings::Count(n) => n.to_string(),
                Listings::Unknown => String::new(),
            };

            lines.push(format!(
                "{},{},{},{},{},{}",
                i + 1,
                Self::csv_escape(&item.name),
                Self::csv_escape(&item.quote.to_string()),
                numeric,
                currency,
                listings
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn listings_cell(listings: Listings) -> String {
    match listings {
        Listings::Count(n) => n.to_string(),
        Listings::Unknown => "N/A".to_string(),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MarketQuote;
    use crate::price::PriceNormalizer;

    fn item(name: &str, price: Option<&str>, listings: Listings) -> ItemResult {
        let quote = MarketQuote::new(price.map(Into::into), listings);
        ItemResult::new(name, quote, &PriceNormalizer::default())
    }

    fn make_report() -> Report {
        Report::new(
            "steam",
            vec![
                item("AK-47 | Asiimov (Field-Tested)", Some("$45.10"), Listings::Count(120)),
                item("AWP | Hyper Beast (Field-Tested)", Some("1 577,29€"), Listings::Count(3)),
                item("M4A4 | Howl (Field-Tested)", None, Listings::Unknown),
                item("Glock-18 | Fade (Factory New)", Some("$4.15"), Listings::Count(7)),
            ],
            2,
        )
    }

    #[test]
    fn test_table_report() {
        let output = Formatter::new(OutputFormat::Table).format_report(&make_report());

        assert!(output.starts_with("Covert Items - Price Summary (steam)"));
        assert!(output.contains("AK-47 | Asiimov (Field-Tested)"));
        assert!(output.contains("|     $45.10 | Listings: 120"));
        assert!(output.contains("|        N/A | Listings: N/A"));
        assert!(output.contains("Total items checked: 4"));
        assert!(output.contains("Total listings: 130"));
        assert!(output.contains("💰 Top 2 Cheapest Items"));

        let top = output.split("Cheapest Items").nth(1).unwrap();
        let glock = top.find("Glock-18").unwrap();
        let ak = top.find("AK-47").unwrap();
        assert!(glock < ak);
        assert!(!top.contains("Howl"));
    }

    #[test]
    fn test_table_truncates_long_names() {
        let long = "X".repeat(90);
        let report = Report::new("steam", vec![item(&long, Some("$1.00"), Listings::Count(1))], 1);
        let output = Formatter::new(OutputFormat::Table).format_report(&report);
        assert!(output.contains(&format!("{}...", "X".repeat(NAME_WIDTH - 3))));
        assert!(!output.contains(&long));
    }

    #[test]
    fn test_json_report() {
        let output = Formatter::new(OutputFormat::Json).format_report(&make_report());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["source"], "steam");
        assert_eq!(value["total_items"], 4);
        assert_eq!(value["total_listings"], 130);
        assert_eq!(value["items"].as_array().unwrap().len(), 4);
        assert_eq!(value["cheapest"][0]["name"], "Glock-18 | Fade (Factory New)");
        assert_eq!(value["items"][2]["quote"]["numeric"], serde_json::Value::Null);
        assert_eq!(value["items"][2]["listings"], "unknown");
    }

    #[test]
    fn test_markdown_report() {
        let output = Formatter::new(OutputFormat::Markdown).format_report(&make_report());

        assert!(output.contains("| Item | Price | Listings |"));
        assert!(output.contains("| AK-47 \\| Asiimov (Field-Tested) | $45.10 | 120 |"));
        assert!(output.contains("1. **Glock-18 | Fade (Factory New)** - $4.15"));
        assert!(output.contains("*4 items checked, 130 listings*"));
    }

    #[test]
    fn test_csv_report_ranked() {
        let output = Formatter::new(OutputFormat::Csv).format_report(&make_report());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "rank,name,price,price_numeric,currency,listings");
        assert_eq!(lines[1], "1,Glock-18 | Fade (Factory New),$4.15,4.15,$,7");
        assert_eq!(lines[3], "3,AWP | Hyper Beast (Field-Tested),\"1 577,29€\",1577.29,€,3");
        assert_eq!(lines[4], "4,M4A4 | Howl (Field-Tested),N/A,,,");
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new("steam", Vec::new(), 10);

        assert_eq!(Formatter::new(OutputFormat::Table).format_report(&report), "No items checked.");
        assert_eq!(
            Formatter::new(OutputFormat::Csv).format_report(&report),
            "rank,name,price,price_numeric,currency,listings"
        );
        let json = Formatter::new(OutputFormat::Json).format_report(&report);
        assert!(json.contains("\"total_items\": 0"));
    }

    #[test]
    fn test_progress_line() {
        let line = Formatter::progress_line(&item("Glove Case", Some("$4.15"), Listings::Count(9)));
        assert_eq!(line, "Glove Case -> $4.15 | Listings: 9");

        let line = Formatter::progress_line(&item("Glove Case", None, Listings::Unknown));
        assert_eq!(line, "Glove Case -> N/A | Listings: unknown");
    }
}
