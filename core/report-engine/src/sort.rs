//! FILENAME: core/report-engine/src/sort.rs
//! PURPOSE: Stable multi-key sorting of report rows.
//! CONTEXT: Benchmark cells are text, so "Auto" ordering decides per value
//! whether to compare it as a number ("10.5 ns" sorts before "9,000 ns" by
//! magnitude) or as text. The sort key values are computed once per row.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use engine::markup::remove_markdown_bold;
use engine::number_format::{extract_number_or_default, starts_with_number};
use engine::table::{self, Table};
use engine::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// How a cell is turned into a comparable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKind {
    /// "-" is 0, text starting with a digit is its leading number, anything
    /// else is compared as text.
    #[default]
    Auto,
    /// Always the leading number (0 when there is none).
    Numeric,
    /// The raw display string.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub kind: SortKind,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        SortKey {
            column: column.into(),
            direction: SortDirection::Ascending,
            kind: SortKind::Auto,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        SortKey {
            direction: SortDirection::Descending,
            ..SortKey::ascending(column)
        }
    }

    pub fn with_kind(mut self, kind: SortKind) -> Self {
        self.kind = kind;
        self
    }

    /// Ascending auto keys for each column.
    pub fn ascending_all(columns: &[String]) -> Vec<SortKey> {
        columns.iter().map(SortKey::ascending).collect()
    }
}

// ============================================================================
// SORT VALUES
// ============================================================================

/// Comparable form of a cell. Total order: missing < number < text.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Number(f64),
    Text(String),
}

impl SortValue {
    pub fn from_row(row: &Row, column: &str, kind: SortKind) -> SortValue {
        let Some(value) = row.get(column) else {
            return SortValue::Missing;
        };
        let display = value.display_value();

        match kind {
            SortKind::Text => SortValue::Text(display),
            SortKind::Numeric => {
                SortValue::Number(extract_number_or_default(&remove_markdown_bold(&display)))
            }
            SortKind::Auto => {
                let text = remove_markdown_bold(&display);
                if text == "-" {
                    SortValue::Number(0.0)
                } else if starts_with_number(&text) {
                    SortValue::Number(extract_number_or_default(&text))
                } else {
                    SortValue::Text(text.into_owned())
                }
            }
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Number(_) => 1,
            SortValue::Text(_) => 2,
        }
    }

    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

type RowKeys = SmallVec<[SortValue; 4]>;

fn compare_keys(a: &RowKeys, b: &RowKeys, keys: &[SortKey]) -> Ordering {
    for ((left, right), key) in a.iter().zip(b.iter()).zip(keys) {
        let ordering = match key.direction {
            SortDirection::Ascending => left.compare(right),
            SortDirection::Descending => right.compare(left),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

// ============================================================================
// SORTING
// ============================================================================

/// Stable sort by the first key, then by each following key.
pub fn sort_rows(rows: Vec<Row>, keys: &[SortKey]) -> Vec<Row> {
    if keys.is_empty() || rows.len() < 2 {
        return rows;
    }

    let mut keyed: Vec<(RowKeys, Row)> = rows
        .into_iter()
        .map(|row| {
            let values = keys
                .iter()
                .map(|key| SortValue::from_row(&row, &key.column, key.kind))
                .collect();
            (values, row)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, keys));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Sorts every divider-delimited segment on its own.
pub fn split_by_null_and_sort_each_collection(rows: &[Option<Row>], keys: &[SortKey]) -> Table {
    let segments = table::split_by_null(table::clone_table(rows));
    table::concat_by_null(segments.into_iter().map(|s| sort_rows(s, keys)).collect())
}

/// Groups by `group_columns` and sorts each group, with dividers between groups.
pub fn split_by_group_and_sort_each_group(
    rows: &[Option<Row>],
    group_columns: &[String],
    keys: &[SortKey],
) -> Table {
    let groups = table::split_rows_by_group(table::clone_table(rows), group_columns);
    table::concat_by_null(groups.into_iter().map(|g| sort_rows(g, keys)).collect())
}
