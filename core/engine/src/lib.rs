//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the report row engine.
//! CONTEXT: Re-exports the row model, the split primitives, and the cell-text
//! helpers shared by the pivot, report and persistence crates.

pub mod cell;
pub mod markup;
pub mod number_format;
pub mod row;
pub mod split;
pub mod style;
pub mod table;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use markup::{is_surrounded_by_markdown_bold, markdown_bold_to_html, set_markdown_bold};
pub use number_format::{extract_number_or_default, starts_with_number, try_extract_number};
pub use row::{Row, RowMeta};
pub use style::{Color, TextAlign};
pub use table::{generate_key, Table};
