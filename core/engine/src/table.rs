//! FILENAME: core/engine/src/table.rs
//! PURPOSE: Row-level wrappers over the split primitives.
//! CONTEXT: A report table is `Vec<Option<Row>>` where `None` is the divider
//! between visual groups. These helpers split and reassemble tables on those
//! dividers, group rows by column values, and apply bulk edits (bold markup,
//! display order, column pruning) to every row of a table.

use crate::cell::CellValue;
use crate::markup;
use crate::row::Row;
use crate::split;

/// A report table. `None` entries are dividers.
pub type Table = Vec<Option<Row>>;

/// Splits on dividers. Dividers never appear in the output.
pub fn split_by_null(table: Table) -> Vec<Vec<Row>> {
    split::split_by_predicate(table, Option::is_none)
        .into_iter()
        .map(|segment| segment.into_iter().flatten().collect())
        .collect()
}

/// Joins segments back into one table with a divider between each pair.
pub fn concat_by_null(segments: Vec<Vec<Row>>) -> Table {
    split::concat_by(
        segments
            .into_iter()
            .map(|segment| segment.into_iter().map(Some).collect::<Table>()),
        || None,
    )
}

/// Stable group-by on the bold-stripped values of `columns`. Dividers are dropped.
pub fn split_rows_by_group(table: Table, columns: &[String]) -> Vec<Vec<Row>> {
    split::split_by_group(table.into_iter().flatten(), |row| generate_key(row, columns))
}

pub fn has_null_divider(table: &[Option<Row>]) -> bool {
    table.iter().any(Option::is_none)
}

pub fn row_count(table: &[Option<Row>]) -> usize {
    table.iter().flatten().count()
}

pub fn clone_table(table: &[Option<Row>]) -> Table {
    table
        .iter()
        .map(|row| row.as_ref().map(Row::clone_with_meta))
        .collect()
}

pub fn clone_tables(tables: &[Table]) -> Vec<Table> {
    tables.iter().map(|table| clone_table(table)).collect()
}

/// Joins the bold-stripped display values of `columns` with `_`.
/// A missing column contributes an empty string.
pub fn generate_key(row: &Row, columns: &[String]) -> String {
    columns
        .iter()
        .map(|column| {
            row.get_text(column)
                .map(|text| markup::remove_markdown_bold(&text).into_owned())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Strips `**` markup from every text cell and clears recorded bold flags.
pub fn remove_markdown_bold(table: &mut [Option<Row>]) {
    for row in table.iter_mut().flatten() {
        remove_row_markdown_bold(row);
    }
}

pub fn remove_row_markdown_bold(row: &mut Row) {
    for value in row.values_mut() {
        if let CellValue::Text(text) = value {
            if text.contains("**") {
                *text = markup::remove_markdown_bold(text).into_owned();
            }
        }
    }
    let bolded: Vec<String> = row.meta().bold_columns().to_vec();
    for column in bolded {
        row.set_bold(&column, false);
    }
}

/// Bolds the given columns of a row, inline and in its metadata.
pub fn set_row_markdown_bold(row: &mut Row, columns: &[&str]) {
    for column in columns {
        if let Some(value) = row.get_mut(column) {
            let bolded = markup::set_markdown_bold(&value.display_value());
            *value = CellValue::Text(bolded);
            row.set_bold(column, true);
        }
    }
}

/// Bolds every column of a row.
pub fn set_row_markdown_bold_all(row: &mut Row) {
    let columns: Vec<String> = row.columns().map(str::to_string).collect();
    let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
    set_row_markdown_bold(row, &refs);
}

/// Assigns display slots 0..n to `columns` on every row.
pub fn set_columns_order(table: &mut [Option<Row>], columns: &[String]) {
    let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
    for row in table.iter_mut().flatten() {
        row.set_columns_order(&refs);
    }
}

/// Drops every column not listed (together with its metadata).
pub fn remove_columns_except(table: &mut [Option<Row>], keep: &[String]) {
    let refs: Vec<&str> = keep.iter().map(String::as_str).collect();
    for row in table.iter_mut().flatten() {
        row.retain_columns(&refs);
    }
}

/// Column names of the first row, by display order.
pub fn header_columns(table: &[Option<Row>]) -> Vec<String> {
    table
        .iter()
        .flatten()
        .next()
        .map(|row| row.columns_by_order().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}
