//! FILENAME: core/persistence/src/lib.rs
//! Benchmark Report Persistence Module
//!
//! Reads exported Markdown benchmark reports and writes processed rows back
//! out as Markdown or HTML.

mod benchmark_info;
mod error;
pub mod html;
pub mod markdown;

pub use benchmark_info::{extract_benchmark_class_name, BenchmarkInfo};
pub use error::PersistenceError;
pub use html::{to_html_table, wrap_in_html_document, HtmlWrapMode, Theme};
pub use markdown::{
    extract_environment_info, extract_markdown_table, parse_markdown_table, to_markdown_table,
    ParseTableDividerMode,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// RENDER OPTIONS
// ============================================================================

/// How divider rows (`None`) are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RenderTableDividerMode {
    /// A blank row between groups.
    #[default]
    EmptyDividerRow,
    /// Dividers are dropped.
    Ignore,
    /// One table per divider-delimited segment.
    SeparateTables,
}

// ============================================================================
// FILE OUTPUT
// ============================================================================

/// Writes a rendered report, creating the parent directory when needed.
pub fn save_text(path: impl AsRef<Path>, contents: &str) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
