//! FILENAME: app/src/options.rs
//! PURPOSE: Options for the simple, join and concatenate report pipelines.
//! CONTEXT: All option structs deserialize from camelCase JSON with defaults
//! for everything optional. `validate()` checks what every output needs;
//! `validate_html()` additionally rejects combinations HTML cannot render.

use serde::{Deserialize, Serialize};

use persistence::{HtmlWrapMode, RenderTableDividerMode, Theme};
use report_engine::process::DEFAULT_OTHER_COLUMNS;

use crate::error::ConfigError;

// ============================================================================
// SIMPLE REPORT
// ============================================================================

/// Options for rendering one benchmark report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    pub title: String,
    pub group_by_columns: Vec<String>,
    /// Falls back to `spectrum_columns` in HTML output when empty.
    pub sort_by_columns: Vec<String>,
    /// HTML only.
    pub spectrum_columns: Vec<String>,
    /// HTML only.
    pub highlight_groups: bool,
    pub divider_mode: RenderTableDividerMode,
    pub theme: Theme,
    pub html_wrap_mode: HtmlWrapMode,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            title: String::new(),
            group_by_columns: Vec::new(),
            sort_by_columns: Vec::new(),
            spectrum_columns: Vec::new(),
            highlight_groups: true,
            divider_mode: RenderTableDividerMode::EmptyDividerRow,
            theme: Theme::Dark,
            html_wrap_mode: HtmlWrapMode::Simple,
        }
    }
}

impl ReportOptions {
    pub fn new(title: impl Into<String>) -> Self {
        ReportOptions {
            title: title.into(),
            ..ReportOptions::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_text(&self.title, "title")
    }

    pub fn validate_html(&self) -> Result<(), ConfigError> {
        check_html_compatibility(self.html_wrap_mode, self.divider_mode)?;
        self.validate()
    }
}

// ============================================================================
// JOIN REPORT
// ============================================================================

/// Options for placing several runs of the same benchmarks side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinReportOptions {
    pub title: String,
    /// Identifies a benchmark across runs (e.g. "Method").
    pub main_column: String,
    pub group_by_columns: Vec<String>,
    /// Column whose values become the compared columns (e.g. "Runtime").
    pub pivot_column: String,
    /// One comparison table is produced per statistic column.
    pub statistic_columns: Vec<String>,
    /// Order of the compared columns (the pivot values).
    pub columns_order: Vec<String>,
    pub other_columns_to_select: Vec<String>,
    pub divider_mode: RenderTableDividerMode,
    /// HTML only.
    pub spectrum_statistic_column: bool,
    /// HTML only.
    pub highlight_groups: bool,
    pub theme: Theme,
    pub html_wrap_mode: HtmlWrapMode,
}

impl Default for JoinReportOptions {
    fn default() -> Self {
        JoinReportOptions {
            title: String::new(),
            main_column: String::new(),
            group_by_columns: Vec::new(),
            pivot_column: String::new(),
            statistic_columns: Vec::new(),
            columns_order: Vec::new(),
            other_columns_to_select: DEFAULT_OTHER_COLUMNS.iter().map(|s| s.to_string()).collect(),
            divider_mode: RenderTableDividerMode::EmptyDividerRow,
            spectrum_statistic_column: true,
            highlight_groups: true,
            theme: Theme::Dark,
            html_wrap_mode: HtmlWrapMode::Simple,
        }
    }
}

impl JoinReportOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_text(&self.title, "title")?;
        require_text(&self.main_column, "mainColumn")?;
        require_items(&self.group_by_columns, "groupByColumns")?;
        require_text(&self.pivot_column, "pivotColumn")?;
        require_items(&self.statistic_columns, "statisticColumns")?;
        require_items(&self.columns_order, "columnsOrder")
    }

    pub fn validate_html(&self) -> Result<(), ConfigError> {
        check_html_compatibility(self.html_wrap_mode, self.divider_mode)?;
        self.validate()
    }
}

// ============================================================================
// CONCATENATE REPORT
// ============================================================================

/// Options for listing several reports one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcatReportOptions {
    pub title: String,
    pub group_by_columns: Vec<String>,
    pub sort_by_columns: Vec<String>,
    pub spectrum_columns: Vec<String>,
    pub highlight_groups: bool,
    pub divider_mode: RenderTableDividerMode,
    /// Print the first report's environment once instead of once per report.
    pub environment_once: bool,
    pub theme: Theme,
    pub html_wrap_mode: HtmlWrapMode,
}

impl Default for ConcatReportOptions {
    fn default() -> Self {
        ConcatReportOptions {
            title: String::new(),
            group_by_columns: Vec::new(),
            sort_by_columns: Vec::new(),
            spectrum_columns: Vec::new(),
            highlight_groups: true,
            divider_mode: RenderTableDividerMode::EmptyDividerRow,
            environment_once: true,
            theme: Theme::Dark,
            html_wrap_mode: HtmlWrapMode::Simple,
        }
    }
}

impl ConcatReportOptions {
    pub fn new(title: impl Into<String>) -> Self {
        ConcatReportOptions {
            title: title.into(),
            ..ConcatReportOptions::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_text(&self.title, "title")
    }

    pub fn validate_html(&self) -> Result<(), ConfigError> {
        check_html_compatibility(self.html_wrap_mode, self.divider_mode)?;
        self.validate()
    }
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

fn require_text(value: &str, name: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue(name));
    }
    Ok(())
}

fn require_items(values: &[String], name: &'static str) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::EmptyList(name));
    }
    Ok(())
}

/// DataTables cannot sort or page around blank divider rows.
fn check_html_compatibility(
    wrap_mode: HtmlWrapMode,
    divider_mode: RenderTableDividerMode,
) -> Result<(), ConfigError> {
    if wrap_mode == HtmlWrapMode::RichDataTables && divider_mode == RenderTableDividerMode::EmptyDividerRow {
        return Err(ConfigError::Incompatible(format!(
            "htmlWrapMode ({:?}) and dividerMode ({:?}) aren't compatible with each other",
            wrap_mode, divider_mode
        )));
    }
    Ok(())
}
