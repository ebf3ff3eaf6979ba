//! Wear and StatTrak filters for variant search results.

use super::Filter;
use crate::market::{ItemResult, StatTrakMode, WearSelection};

/// Keeps items whose name carries a selected wear suffix.
pub struct WearFilter {
    selection: WearSelection,
}

impl WearFilter {
    pub fn new(selection: WearSelection) -> Self {
        Self { selection }
    }
}

impl Filter for WearFilter {
    fn matches(&self, item: &ItemResult) -> bool {
        match self.selection {
            WearSelection::All => true,
            WearSelection::One(wear) => item.wear() == Some(wear),
        }
    }

    fn description(&self) -> String {
        format!("Wear: {}", self.selection)
    }
}

/// Keeps regular items, StatTrak items, or both.
pub struct StatTrakFilter {
    mode: StatTrakMode,
}

impl StatTrakFilter {
    pub fn new(mode: StatTrakMode) -> Self {
        Self { mode }
    }
}

impl Filter for StatTrakFilter {
    fn matches(&self, item: &ItemResult) -> bool {
        self.mode.includes(item.is_stattrak())
    }

    fn description(&self) -> String {
        format!("StatTrak: {}", self.mode)
    }
}
