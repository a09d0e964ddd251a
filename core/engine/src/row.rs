//! FILENAME: core/engine/src/row.rs
//! PURPOSE: The dynamically keyed row that every report transformation works on.
//! CONTEXT: A benchmark table has no fixed schema. Pivoting renames columns to
//! data values and joins append columns, so a row is an ordered list of
//! (column name, value) pairs. Each row also owns a `RowMeta` record with the
//! presentation state the pipeline accumulates: the display slot of each
//! column, background colors, and which cells were bolded.
//!
//! Rows are deliberately not `Clone`. Copying a row is a visible step in the
//! pipeline, so callers pick `clone_with_meta` or `clone_without_meta`.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

// ============================================================================
// METADATA
// ============================================================================

/// Presentation metadata attached to a row. Never rendered as a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowMeta {
    /// Display slot per column, in insertion order.
    columns_order: Vec<(String, i32)>,
    /// Background color (hex string) per column.
    background_colors: Vec<(String, String)>,
    /// Columns whose cell was bolded by the colorizer.
    bold_columns: Vec<String>,
}

impl RowMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_order(&self, column: &str) -> Option<i32> {
        self.columns_order
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, order)| *order)
    }

    pub fn set_column_order(&mut self, column: &str, order: i32) {
        match self.columns_order.iter_mut().find(|(name, _)| name == column) {
            Some(entry) => entry.1 = order,
            None => self.columns_order.push((column.to_string(), order)),
        }
    }

    pub fn remove_column_order(&mut self, column: &str) -> Option<i32> {
        let index = self.columns_order.iter().position(|(name, _)| name == column)?;
        Some(self.columns_order.remove(index).1)
    }

    /// All order entries as stored.
    pub fn columns_order(&self) -> &[(String, i32)] {
        &self.columns_order
    }

    pub fn clear_columns_order(&mut self) {
        self.columns_order.clear();
    }

    pub fn background_color(&self, column: &str) -> Option<&str> {
        self.background_colors
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, color)| color.as_str())
    }

    pub fn set_background_color(&mut self, column: &str, color: impl Into<String>) {
        let color = color.into();
        match self.background_colors.iter_mut().find(|(name, _)| name == column) {
            Some(entry) => entry.1 = color,
            None => self.background_colors.push((column.to_string(), color)),
        }
    }

    pub fn remove_background_color(&mut self, column: &str) -> Option<String> {
        let index = self
            .background_colors
            .iter()
            .position(|(name, _)| name == column)?;
        Some(self.background_colors.remove(index).1)
    }

    pub fn is_bold(&self, column: &str) -> bool {
        self.bold_columns.iter().any(|name| name == column)
    }

    pub fn set_bold(&mut self, column: &str, bold: bool) {
        let present = self.is_bold(column);
        if bold && !present {
            self.bold_columns.push(column.to_string());
        } else if !bold && present {
            self.bold_columns.retain(|name| name != column);
        }
    }

    pub fn bold_columns(&self) -> &[String] {
        &self.bold_columns
    }

    /// Moves every entry keyed by `from` over to `to`.
    fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(order) = self.remove_column_order(from) {
            self.set_column_order(to, order);
        }
        if let Some(color) = self.remove_background_color(from) {
            self.set_background_color(to, color);
        }
        if self.is_bold(from) {
            self.set_bold(from, false);
            self.set_bold(to, true);
        }
    }

    /// Drops every entry keyed by `column`.
    fn forget_column(&mut self, column: &str) {
        self.remove_column_order(column);
        self.remove_background_color(column);
        self.set_bold(column, false);
    }
}

// ============================================================================
// ROW
// ============================================================================

/// An ordered mapping of column name to value, plus its metadata.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
    meta: RowMeta,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from (column, value) pairs. Later duplicates replace
    /// earlier ones in place. No column order is assigned.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = Row::new();
        for (column, value) in pairs {
            row.set(column, value);
        }
        row
    }

    /// Builder form of `set`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    /// Deep copy of cells and metadata.
    pub fn clone_with_meta(&self) -> Row {
        Row {
            cells: self.cells.clone(),
            meta: self.meta.clone(),
        }
    }

    /// Copy of the cells only. The copy starts with empty metadata.
    pub fn clone_without_meta(&self) -> Row {
        Row {
            cells: self.cells.clone(),
            meta: RowMeta::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Cells
    // ------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut CellValue> {
        self.cells
            .iter_mut()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Display string of the cell, None when the column is absent.
    pub fn get_text(&self, column: &str) -> Option<String> {
        self.get(column).map(CellValue::display_value)
    }

    /// Replaces an existing value in place, or appends a new column.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        let value = value.into();
        match self.position(&column) {
            Some(index) => self.cells[index].1 = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Removes a column together with its metadata.
    pub fn remove(&mut self, column: &str) -> Option<CellValue> {
        let index = self.position(column)?;
        self.meta.forget_column(column);
        Some(self.cells.remove(index).1)
    }

    /// Renames a column. The value moves to the end of the row (or replaces
    /// an existing `to` column in place) and its metadata follows it.
    /// Returns false when `from` is absent.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.contains(from);
        }
        let Some(index) = self.position(from) else {
            return false;
        };
        let (_, value) = self.cells.remove(index);
        self.meta.forget_column(to);
        self.meta.rename_column(from, to);
        self.set(to, value);
        true
    }

    /// Keeps only the listed columns, dropping metadata of the rest.
    pub fn retain_columns(&mut self, keep: &[&str]) {
        let dropped: Vec<String> = self
            .cells
            .iter()
            .filter(|(name, _)| !keep.contains(&name.as_str()))
            .map(|(name, _)| name.clone())
            .collect();
        for column in dropped {
            self.remove(&column);
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut CellValue> {
        self.cells.iter_mut().map(|(_, value)| value)
    }

    /// Name of the last column other than `except`.
    pub fn last_column_except(&self, except: &str) -> Option<&str> {
        self.cells
            .iter()
            .rev()
            .map(|(name, _)| name.as_str())
            .find(|name| *name != except)
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.cells.iter().position(|(name, _)| name == column)
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    pub fn meta(&self) -> &RowMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut RowMeta {
        &mut self.meta
    }

    pub fn column_order(&self, column: &str) -> Option<i32> {
        self.meta.column_order(column)
    }

    pub fn set_column_order(&mut self, column: &str, order: i32) {
        self.meta.set_column_order(column, order);
    }

    /// Assigns slot 0..n to the given columns.
    pub fn set_columns_order(&mut self, columns: &[&str]) {
        for (order, column) in columns.iter().enumerate() {
            self.meta.set_column_order(column, order as i32);
        }
    }

    /// Gives `column` the slot after the last other column of the row.
    pub fn set_column_order_identity(&mut self, column: &str) {
        let last_order = self
            .last_column_except(column)
            .and_then(|last| self.meta.column_order(last))
            .or_else(|| self.meta.columns_order().iter().map(|(_, o)| *o).max())
            .unwrap_or(-1);
        self.meta.set_column_order(column, last_order + 1);
    }

    /// Copies the display slot of `from` to `to`. No-op when `from` has none.
    pub fn transfer_column_order(&mut self, from: &str, to: &str) {
        if let Some(order) = self.meta.column_order(from) {
            self.meta.set_column_order(to, order);
        }
    }

    /// Columns that have both a value and a display slot, ordered by slot.
    /// Ties keep the order in which the slots were assigned.
    pub fn columns_by_order(&self) -> Vec<&str> {
        let mut ordered: Vec<(&str, i32)> = self
            .meta
            .columns_order()
            .iter()
            .filter(|(name, _)| self.contains(name))
            .map(|(name, order)| (name.as_str(), *order))
            .collect();
        ordered.sort_by_key(|(_, order)| *order);
        ordered.into_iter().map(|(name, _)| name).collect()
    }

    pub fn background_color(&self, column: &str) -> Option<&str> {
        self.meta.background_color(column)
    }

    pub fn set_background_color(&mut self, column: &str, color: impl Into<String>) {
        self.meta.set_background_color(column, color);
    }

    pub fn is_bold(&self, column: &str) -> bool {
        self.meta.is_bold(column)
    }

    pub fn set_bold(&mut self, column: &str, bold: bool) {
        self.meta.set_bold(column, bold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        let mut row = Row::from_pairs([("Method", "Foo"), ("Runtime", ".NET 8"), ("Mean", "10 ns")]);
        row.set_columns_order(&["Method", "Runtime", "Mean"]);
        row
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut row = sample();
        row.set("Runtime", ".NET 6");
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["Method", "Runtime", "Mean"]);
        assert_eq!(row.get_text("Runtime").as_deref(), Some(".NET 6"));
    }

    #[test]
    fn test_rename_appends_and_moves_metadata() {
        let mut row = sample();
        row.set_background_color("Mean", "#FF0000");
        assert!(row.rename("Mean", "Net8"));

        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["Method", "Runtime", "Net8"]);
        assert_eq!(row.column_order("Net8"), Some(2));
        assert_eq!(row.column_order("Mean"), None);
        assert_eq!(row.background_color("Net8"), Some("#FF0000"));
        assert!(!row.rename("Missing", "X"));
    }

    #[test]
    fn test_rename_to_first_column_moves_to_end() {
        let mut row = sample();
        row.rename("Method", "Name");
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["Runtime", "Mean", "Name"]);
    }

    #[test]
    fn test_columns_by_order_skips_unordered_and_missing() {
        let mut row = sample();
        row.set("Extra", "x");
        row.set_column_order("Ghost", 0);
        row.set_column_order("Method", 5);
        assert_eq!(row.columns_by_order(), vec!["Runtime", "Mean", "Method"]);
    }

    #[test]
    fn test_set_column_order_identity() {
        let mut row = sample();
        row.set("Net6", "12 ns");
        row.set_column_order_identity("Net6");
        assert_eq!(row.column_order("Net6"), Some(3));

        let mut bare = Row::from_pairs([("A", "1")]);
        bare.set_column_order_identity("A");
        assert_eq!(bare.column_order("A"), Some(0));
    }

    #[test]
    fn test_transfer_column_order() {
        let mut row = sample();
        row.transfer_column_order("Mean", "Net8");
        assert_eq!(row.column_order("Net8"), Some(2));
        row.transfer_column_order("Nope", "Other");
        assert_eq!(row.column_order("Other"), None);
    }

    #[test]
    fn test_clone_with_and_without_meta() {
        let mut row = sample();
        row.set_bold("Mean", true);

        let with = row.clone_with_meta();
        assert_eq!(with, row);

        let without = row.clone_without_meta();
        assert_eq!(without.get_text("Mean").as_deref(), Some("10 ns"));
        assert!(without.meta().columns_order().is_empty());
        assert!(!without.is_bold("Mean"));
    }

    #[test]
    fn test_remove_and_retain_drop_metadata() {
        let mut row = sample();
        row.set_background_color("Runtime", "#CCFFFF");
        row.remove("Runtime");
        assert!(row.background_color("Runtime").is_none());
        assert!(row.column_order("Runtime").is_none());

        row.retain_columns(&["Mean"]);
        assert_eq!(row.len(), 1);
        assert_eq!(row.columns_by_order(), vec!["Mean"]);
    }

    #[test]
    fn test_row_serializes_with_meta() {
        let mut row = sample();
        row.set_background_color("Mean", "#99FF99");
        let json = serde_json::to_string(&row).unwrap();
        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_set_bold_is_idempotent() {
        let mut meta = RowMeta::new();
        meta.set_bold("A", true);
        meta.set_bold("A", true);
        assert_eq!(meta.bold_columns().len(), 1);
        meta.set_bold("A", false);
        assert!(!meta.is_bold("A"));
    }
}
