//! CLI command implementations.

pub mod lookup;
pub mod variants;

use crate::catalog::Selection;
use crate::config::Config;
use crate::filters::FilterChain;
use crate::format::Formatter;
use crate::market::jittered;
use crate::ranking::Report;
use crate::snapshot;
use std::time::Duration;
use tracing::{debug, warn};

pub use lookup::LookupCommand;
pub use variants::VariantsCommand;

/// Sleeps between consecutive lookups.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay_ms: u64,
    jitter_ms: u64,
}

impl Pacer {
    pub fn new(delay_ms: u64, jitter_ms: u64) -> Self {
        Self { delay_ms, jitter_ms }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.delay_ms, config.delay_jitter_ms)
    }

    /// Picks the next pause: the base delay plus 0 to `jitter_ms`.
    pub fn next_delay(&self) -> Duration {
        jittered(self.delay_ms, self.jitter_ms)
    }

    /// Adds a random delay to keep the markets from throttling us.
    pub async fn wait(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }

        debug!("Delaying {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}

/// Filters the report, saves a snapshot when enabled and formats the output.
fn finish(config: &Config, selection: &Selection, report: Report, filters: &FilterChain) -> String {
    let report = if filters.is_empty() {
        report
    } else {
        debug!("Active filters: {}", filters.descriptions().join(", "));
        Report::new(report.source, filters.apply(report.results), report.top_n)
    };

    debug!("{} of {} items have a readable price", report.priced_items(), report.total_items());

    if config.save_snapshot {
        match snapshot::save(&report, selection, &config.data_dir) {
            Ok(path) => eprintln!("Saved results to {}", path.display()),
            Err(e) => warn!("Could not save snapshot: {:#}", e),
        }
    }

    Formatter::new(config.format).format_report(&report)
}
