//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot/Join Definition - The serializable configuration.
//!
//! These types DESCRIBE a pivot or a join over report tables. They are
//! plain data so report options can embed them and load them from JSON.

use serde::{Deserialize, Serialize};

// ============================================================================
// PIVOT
// ============================================================================

/// Turns the values of `pivot_column` into column names, each holding the
/// row's `statistic_column` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotSpec {
    /// Column whose values become new column names (e.g. "Runtime").
    pub pivot_column: String,

    /// Column whose value moves under the new name (e.g. "Mean").
    pub statistic_column: String,

    /// Whether the pivot column itself is dropped from each row.
    #[serde(default = "default_true")]
    pub remove_pivot_column: bool,
}

impl PivotSpec {
    pub fn new(pivot_column: impl Into<String>, statistic_column: impl Into<String>) -> Self {
        PivotSpec {
            pivot_column: pivot_column.into(),
            statistic_column: statistic_column.into(),
            remove_pivot_column: true,
        }
    }

    pub fn keep_pivot_column(mut self) -> Self {
        self.remove_pivot_column = false;
        self
    }
}

// ============================================================================
// JOIN
// ============================================================================

/// Sequential inner join of several tables on a composite key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSpec {
    /// Columns whose bold-stripped values form the join key.
    pub key_columns: Vec<String>,

    /// Columns copied from each right-hand row onto the matched left row.
    pub columns_to_copy: Vec<String>,
}

impl JoinSpec {
    pub fn new(key_columns: Vec<String>, columns_to_copy: Vec<String>) -> Self {
        JoinSpec {
            key_columns,
            columns_to_copy,
        }
    }
}

fn default_true() -> bool {
    true
}
