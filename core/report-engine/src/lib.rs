//! FILENAME: core/report-engine/src/lib.rs
//! Report shaping subsystem for benchviz.
//!
//! This crate turns raw benchmark tables into presentation-ready ones. It
//! depends on `pivot-engine` to reshape runs side by side, and on `engine`
//! for the row model.
//!
//! Layers:
//! - `settings`: Process-wide presentation settings (threshold, colors, hook)
//! - `group`: Group dividers and alternating group highlights
//! - `spectrum`: Red-to-green coloring of statistic columns
//! - `sort`: Stable multi-key sorting
//! - `process`: The shared `process` / `join_and_process` pipelines

pub mod group;
pub mod process;
pub mod settings;
pub mod sort;
pub mod spectrum;

pub use group::{
    add_null_divider_between_each_collection, add_null_divider_between_groups,
    highlight_columns_of_each_collection, split_by_group_and_highlight_columns,
    split_by_null_and_highlight_columns, Highlighter,
};
pub use process::{join_and_process, process, JoinProcessOptions, ProcessOptions};
pub use settings::{
    reset_settings, set_maximum_fn, set_settings, settings, update_settings, HighlightColors,
    MaximumFn, ReportSettings,
};
pub use sort::{
    sort_rows, split_by_group_and_sort_each_group, split_by_null_and_sort_each_collection,
    SortDirection, SortKey, SortKind, SortValue,
};
pub use spectrum::{
    spectrum_columns, spectrum_columns_with, split_by_group_and_spectrum_columns,
    split_by_null_and_spectrum_columns,
};
