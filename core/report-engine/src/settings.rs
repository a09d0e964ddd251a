//! FILENAME: core/report-engine/src/settings.rs
//! PURPOSE: Process-wide presentation settings for the report pipeline.
//! CONTEXT: The spectrum threshold, the two highlight colors and the optional
//! maximum hook are shared by every pipeline in the process. They live behind
//! a `RwLock` and are read once at the start of each colorizing call, so a
//! change never affects a call already in progress.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Overrides the maximum of a spectrum segment. Receives the column name and
/// the parsed values of the segment.
pub type MaximumFn = fn(&str, &[f64]) -> f64;

pub const DEFAULT_SPECTRUM_MAX_THRESHOLD: f64 = 2.0;
pub const DEFAULT_HIGHLIGHT_COLOR_1: &str = "#CCFFFF";
pub const DEFAULT_HIGHLIGHT_COLOR_2: &str = "#FFCCFF";

/// The two alternating group highlight colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightColors {
    pub color1: String,
    pub color2: String,
}

impl HighlightColors {
    pub fn new(color1: impl Into<String>, color2: impl Into<String>) -> Self {
        HighlightColors {
            color1: color1.into(),
            color2: color2.into(),
        }
    }
}

impl Default for HighlightColors {
    fn default() -> Self {
        HighlightColors::new(DEFAULT_HIGHLIGHT_COLOR_1, DEFAULT_HIGHLIGHT_COLOR_2)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSettings {
    /// The spectrum maximum is raised to at least `min * threshold`, so a
    /// segment of near-equal values is not painted red-to-green.
    pub spectrum_max_threshold: f64,
    pub highlight_color1: String,
    pub highlight_color2: String,
    #[serde(skip)]
    pub maximum_fn: Option<MaximumFn>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            spectrum_max_threshold: DEFAULT_SPECTRUM_MAX_THRESHOLD,
            highlight_color1: DEFAULT_HIGHLIGHT_COLOR_1.to_string(),
            highlight_color2: DEFAULT_HIGHLIGHT_COLOR_2.to_string(),
            maximum_fn: None,
        }
    }
}

// The hook is compared by presence only.
impl PartialEq for ReportSettings {
    fn eq(&self, other: &Self) -> bool {
        self.spectrum_max_threshold == other.spectrum_max_threshold
            && self.highlight_color1 == other.highlight_color1
            && self.highlight_color2 == other.highlight_color2
            && self.maximum_fn.is_some() == other.maximum_fn.is_some()
    }
}

impl ReportSettings {
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn highlight_colors(&self) -> HighlightColors {
        HighlightColors::new(self.highlight_color1.clone(), self.highlight_color2.clone())
    }
}

// ============================================================================
// GLOBAL STATE
// ============================================================================

static SETTINGS: Lazy<RwLock<ReportSettings>> = Lazy::new(|| RwLock::new(ReportSettings::default()));

/// Snapshot of the current settings.
pub fn settings() -> ReportSettings {
    match SETTINGS.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_settings(new_settings: ReportSettings) {
    update_settings(|current| *current = new_settings);
}

pub fn update_settings<F: FnOnce(&mut ReportSettings)>(f: F) {
    let mut guard = match SETTINGS.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut guard);
}

pub fn reset_settings() {
    set_settings(ReportSettings::default());
}

pub fn set_maximum_fn(maximum_fn: Option<MaximumFn>) {
    update_settings(|s| s.maximum_fn = maximum_fn);
}

/// Serializes unit tests that read or write the global settings.
#[cfg(test)]
pub(crate) static TEST_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn lock_settings_for_test() -> std::sync::MutexGuard<'static, ()> {
    TEST_GUARD.lock().unwrap_or_else(|e| e.into_inner())
}
