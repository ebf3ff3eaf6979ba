//! Item catalog loading and market name decoration.

use crate::market::{decorate, StatTrakMode, WearSelection};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Parses catalog text: one base name per line, trimmed, blank lines skipped.
pub fn parse_catalog(content: &str) -> Vec<String> {
    content.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect()
}

/// Reads the item catalog. A missing file is an error; nothing is fetched without it.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    debug!("Loading item catalog from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read item catalog: {}", path.display()))?;

    let names = parse_catalog(&content);
    debug!("Loaded {} catalog entries", names.len());
    Ok(names)
}

/// The wear and StatTrak choices of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub wear: WearSelection,
    pub stattrak: StatTrakMode,
}

impl Selection {
    pub fn new(wear: WearSelection, stattrak: StatTrakMode) -> Self {
        Self { wear, stattrak }
    }

    /// Expands base names into full market names.
    ///
    /// Each base name yields one name per selected wear and StatTrak flag, regular
    /// before StatTrak and best wear first. Duplicates (names that already carried a
    /// suffix) are dropped, keeping the first occurrence.
    pub fn decorate(&self, base_names: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for base in base_names {
            for &stattrak in self.stattrak.variants() {
                for wear in self.wear.wears() {
                    let name = decorate(base, Some(wear), stattrak);
                    if seen.insert(name.clone()) {
                        names.push(name);
                    }
                }
            }
        }

        names
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wear: {}, StatTrak: {}", self.wear, self.stattrak)
    }
}
