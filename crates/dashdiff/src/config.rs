//! Options for report building and change tracking.
//!
//! Both structs deserialize with every field optional, so a host can embed
//! them in its own TOML or JSON settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::source::StateChange;

/// Which opt-in categories a save persists.
///
/// Everything defaults to `false`: time range, refresh interval and variable
/// values are normalized away unless the user asks to save them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub save_time_range: bool,
    pub save_variables: bool,
    pub save_refresh: bool,
}

pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// State keys that never make a dashboard dirty on their own.
pub const DEFAULT_IGNORED_KEYS: &[&str] = &["isEditing", "isDirty", "isLoading", "data"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Quiescence window before a recomputation runs.
    pub debounce_ms: u64,
    pub ignored_keys: Vec<String>,
    pub report: ReportOptions,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            ignored_keys: DEFAULT_IGNORED_KEYS.iter().map(|k| (*k).to_owned()).collect(),
            report: ReportOptions::default(),
        }
    }
}

impl TrackerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// A change qualifies unless every key it names is ignored. A change that
    /// names no keys always qualifies.
    pub fn qualifies(&self, change: &StateChange) -> bool {
        change.keys.is_empty() || change.keys.iter().any(|k| !self.ignored_keys.contains(k))
    }
}
