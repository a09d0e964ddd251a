//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for benchviz.
// CONTEXT: Wires the core crates into the three report pipelines and
// re-exports what a caller needs to load reports and render them.

pub mod error;
pub mod logging;
pub mod options;
pub mod report;

pub use engine::{CellValue, Row, RowMeta, Table};
pub use error::{ConfigError, Result, VisualizerError};
pub use options::{ConcatReportOptions, JoinReportOptions, ReportOptions};
pub use persistence::{
    BenchmarkInfo, HtmlWrapMode, ParseTableDividerMode, PersistenceError, RenderTableDividerMode, Theme,
};
pub use report::{
    concat_reports_html, concat_reports_markdown, join_reports_html, join_reports_markdown,
    report_html, report_markdown, save_concat_reports_html, save_concat_reports_markdown,
    save_join_reports_html, save_join_reports_markdown, save_report_html, save_report_markdown,
};
pub use report_engine::{
    reset_settings, set_maximum_fn, set_settings, settings, update_settings, ReportSettings,
};
