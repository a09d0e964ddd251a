//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot/Join subsystem for benchviz.
//!
//! This crate reshapes report tables from long form (one row per run) to
//! wide form (one column per pivot value). It depends on `engine` only for
//! the row model and the split helpers.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot/join IS)
//! - `engine`: Reshaping functions (HOW rows are pivoted and joined)

pub mod definition;
pub mod engine;

pub use definition::*;
pub use engine::{
    join_collections_together, merge_and_split_by_group, order_collections_by_values,
    pivot_column, pivot_column_each_collection, pivot_table,
};
