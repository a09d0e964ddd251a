//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot/Join Engine - Reshapes benchmark tables from long to wide form.
//!
//! A benchmark run produces one row per (method, runtime, ...) combination.
//! Comparing runtimes side by side needs one row per method with a column
//! per runtime. That is done in three steps:
//! 1. Split the rows into one collection per pivot value
//! 2. Pivot each collection: the statistic column is renamed to the pivot value
//! 3. Inner-join the collections on the key columns, copying the new columns
//!
//! Every function clones its input rows (with metadata) before changing them.

use rustc_hash::FxHashMap;

use engine::markup::remove_markdown_bold;
use engine::table::{self, generate_key, Table};
use engine::{CellValue, Row};

use crate::definition::{JoinSpec, PivotSpec};

// ============================================================================
// PIVOT
// ============================================================================

/// Renames the statistic column of every row to the row's (bold-stripped)
/// pivot value, moving its display slot along. Dividers pass through.
pub fn pivot_column(rows: &[Option<Row>], spec: &PivotSpec) -> Table {
    rows.iter()
        .map(|row| row.as_ref().map(|row| pivot_row(row, spec)))
        .collect()
}

fn pivot_row(source: &Row, spec: &PivotSpec) -> Row {
    let mut row = source.clone_with_meta();

    if let Some(pivot_value) = row.get_text(&spec.pivot_column) {
        let pivot_value = remove_markdown_bold(&pivot_value).into_owned();
        // Metadata (display slot, colors) follows the renamed column.
        row.rename(&spec.statistic_column, &pivot_value);
        if spec.remove_pivot_column && pivot_value != spec.pivot_column {
            row.remove(&spec.pivot_column);
        }
    }
    row
}

/// Applies `pivot_column` to each collection.
pub fn pivot_column_each_collection(tables: &[Table], spec: &PivotSpec) -> Vec<Table> {
    tables.iter().map(|table| pivot_column(table, spec)).collect()
}

// ============================================================================
// MERGE / JOIN
// ============================================================================

/// Concatenates all tables and regroups the rows by `columns`, ignoring the
/// original table boundaries. Dividers are dropped.
pub fn merge_and_split_by_group(tables: &[Table], columns: &[String]) -> Vec<Table> {
    let merged: Table = tables.iter().flat_map(|t| table::clone_table(t)).collect();
    table::split_rows_by_group(merged, columns)
        .into_iter()
        .map(|group| group.into_iter().map(Some).collect())
        .collect()
}

/// Sequential inner join: the first collection is joined with the second,
/// the result with the third, and so on.
///
/// Rows match on `generate_key` over the key columns. For every matched left
/// row each `columns_to_copy` value present on the right row is copied as
/// text and given the display slot after the row's last column. Unmatched
/// rows are dropped. When a later collection holds several rows with the
/// same key, the last one is used.
pub fn join_collections_together(tables: &[Table], spec: &JoinSpec) -> Vec<Row> {
    let mut collections = tables.iter();
    let Some(first) = collections.next() else {
        return Vec::new();
    };

    let mut joined: Vec<Row> = first.iter().flatten().map(Row::clone_with_meta).collect();

    for next in collections {
        let mut right_by_key: FxHashMap<String, &Row> = FxHashMap::default();
        for row in next.iter().flatten() {
            right_by_key.insert(generate_key(row, &spec.key_columns), row);
        }

        joined = joined
            .into_iter()
            .filter_map(|mut left| {
                let right = right_by_key.get(&generate_key(&left, &spec.key_columns))?;
                copy_columns(&mut left, right, &spec.columns_to_copy);
                Some(left)
            })
            .collect();
    }

    joined
}

fn copy_columns(left: &mut Row, right: &Row, columns: &[String]) {
    for column in columns {
        if let Some(value) = right.get(column) {
            let text = value.display_value();
            left.set_column_order_identity(column);
            left.set(column.as_str(), CellValue::Text(text));
        }
    }
}

/// Pivots a whole table in one call: rows sharing the key columns collapse
/// into one row with a column per distinct pivot value.
pub fn pivot_table(table: &[Option<Row>], key_columns: &[String], spec: &PivotSpec) -> Vec<Row> {
    let pivot_group = vec![spec.pivot_column.clone()];
    let segments: Vec<Table> = table::split_rows_by_group(table::clone_table(table), &pivot_group)
        .into_iter()
        .map(|group| group.into_iter().map(Some).collect())
        .collect();

    let pivot_values: Vec<String> = segments
        .iter()
        .filter_map(|segment| segment.iter().flatten().next())
        .filter_map(|row| row.get_text(&spec.pivot_column))
        .map(|value| remove_markdown_bold(&value).into_owned())
        .collect();

    let pivoted = pivot_column_each_collection(&segments, spec);
    join_collections_together(&pivoted, &JoinSpec::new(key_columns.to_vec(), pivot_values))
}

// ============================================================================
// ORDERING
// ============================================================================

/// Orders collections by where the `column` value of their first row appears
/// in `order_values`. Collections with unknown values keep their relative
/// order and go last.
pub fn order_collections_by_values(
    tables: Vec<Table>,
    column: &str,
    order_values: &[String],
) -> Vec<Table> {
    let key_columns = vec![column.to_string()];
    let mut indexed: Vec<(usize, Table)> = tables
        .into_iter()
        .map(|table| {
            let position = table
                .iter()
                .flatten()
                .next()
                .map(|row| generate_key(row, &key_columns))
                .and_then(|key| order_values.iter().position(|v| *v == key))
                .unwrap_or(usize::MAX);
            (position, table)
        })
        .collect();

    indexed.sort_by_key(|(position, _)| *position);
    indexed.into_iter().map(|(_, table)| table).collect()
}
