//! FILENAME: core/report-engine/src/process.rs
//! PURPOSE: The two shared report pipelines, `process` and `join_and_process`.
//! CONTEXT: Every report runs its rows through `process`: group and divide,
//! highlight the groups, colorize the statistics, sort inside each group.
//! Join reports first merge several runs (one per OS, runtime, ...) into one
//! wide table with `join_and_process`, which then hands over to `process`.

use serde::{Deserialize, Serialize};

use engine::table::{self, Table};
use engine::Row;
use pivot_engine::{
    join_collections_together, merge_and_split_by_group, pivot_column_each_collection, JoinSpec,
    PivotSpec,
};

use crate::group::{add_null_divider_between_groups, split_by_null_and_highlight_columns};
use crate::settings;
use crate::sort::{split_by_null_and_sort_each_collection, SortKey};
use crate::spectrum::split_by_null_and_spectrum_columns;

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessOptions {
    /// Rows are grouped (stable, first occurrence) and divided by these columns.
    pub group_by_columns: Vec<String>,
    /// Statistic columns painted on the red-to-green spectrum.
    pub spectrum_columns: Vec<String>,
    /// Sort keys applied within each group.
    pub sort_by: Vec<SortKey>,
    /// Alternate the background of the group-by cells per group.
    pub highlight_groups: bool,
    /// Bold the whole row holding the lowest value of the first spectrum column.
    pub bold_entire_row_of_lowest_value: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            group_by_columns: Vec::new(),
            spectrum_columns: Vec::new(),
            sort_by: Vec::new(),
            highlight_groups: true,
            bold_entire_row_of_lowest_value: true,
        }
    }
}

/// Default for `JoinProcessOptions::other_columns_to_select`.
pub const DEFAULT_OTHER_COLUMNS: &[&str] = &["Categories"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinProcessOptions {
    /// Identifies a row across the joined tables (e.g. "Method").
    pub main_column: String,
    pub group_by_columns: Vec<String>,
    /// Column whose values become the new column names (e.g. "Runtime").
    pub pivot_column: String,
    /// Column whose value fills the new columns (e.g. "Mean").
    pub statistic_column: String,
    /// Display order of the pivoted columns. Also the spectrum and sort target.
    pub columns_order: Vec<String>,
    #[serde(default = "default_other_columns")]
    pub other_columns_to_select: Vec<String>,
    #[serde(default = "default_true")]
    pub spectrum_statistic_column: bool,
    #[serde(default = "default_true")]
    pub highlight_groups: bool,
}

impl JoinProcessOptions {
    pub fn new(
        main_column: impl Into<String>,
        group_by_columns: Vec<String>,
        pivot_column: impl Into<String>,
        statistic_column: impl Into<String>,
        columns_order: Vec<String>,
    ) -> Self {
        JoinProcessOptions {
            main_column: main_column.into(),
            group_by_columns,
            pivot_column: pivot_column.into(),
            statistic_column: statistic_column.into(),
            columns_order,
            other_columns_to_select: default_other_columns(),
            spectrum_statistic_column: true,
            highlight_groups: true,
        }
    }

    /// `[main, ...other_columns_to_select, ...group_by, ...columns_order]`,
    /// first occurrence wins.
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        let all = std::iter::once(&self.main_column)
            .chain(&self.other_columns_to_select)
            .chain(&self.group_by_columns)
            .chain(&self.columns_order);
        for column in all {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        columns
    }
}

fn default_other_columns() -> Vec<String> {
    DEFAULT_OTHER_COLUMNS.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// PIPELINES
// ============================================================================

/// Groups, highlights, colorizes and sorts a copy of `rows`.
///
/// Bold markup is stripped first. Grouping adds a divider between groups;
/// highlighting, spectrum and sorting then work on each divider-delimited
/// segment. Each step is skipped when its column list is empty.
pub fn process(rows: &[Option<Row>], options: &ProcessOptions) -> Table {
    let mut result = table::clone_table(rows);
    table::remove_markdown_bold(&mut result);

    if !options.group_by_columns.is_empty() {
        result = add_null_divider_between_groups(&result, &options.group_by_columns);

        if options.highlight_groups {
            let colors = settings::settings().highlight_colors();
            result = split_by_null_and_highlight_columns(&result, &options.group_by_columns, &colors);
        }
    }

    if !options.spectrum_columns.is_empty() {
        result = split_by_null_and_spectrum_columns(
            &result,
            &options.spectrum_columns,
            options.bold_entire_row_of_lowest_value,
        );
    }

    if !options.sort_by.is_empty() {
        result = split_by_null_and_sort_each_collection(&result, &options.sort_by);
    }

    result
}

/// Merges several runs into one wide table and processes it.
///
/// 1. All rows are regrouped by the pivot column across table boundaries
/// 2. Each group is pivoted: the statistic column is renamed to the pivot value
/// 3. The groups are inner-joined on `[main, ...group_by]`, copying `columns_order`
/// 4. The result goes through `process`, grouped by `group_by`, colorized and
///    sorted by `columns_order`, bolding only the lowest cells
/// 5. Only the output columns are kept, in output order
pub fn join_and_process(tables: &[Table], options: &JoinProcessOptions) -> Table {
    let segments = merge_and_split_by_group(tables, std::slice::from_ref(&options.pivot_column));
    let pivoted = pivot_column_each_collection(
        &segments,
        &PivotSpec::new(options.pivot_column.as_str(), options.statistic_column.as_str()),
    );

    let mut key_columns = vec![options.main_column.clone()];
    key_columns.extend(options.group_by_columns.iter().cloned());
    let joined: Table = join_collections_together(
        &pivoted,
        &JoinSpec::new(key_columns, options.columns_order.clone()),
    )
    .into_iter()
    .map(Some)
    .collect();

    let process_options = ProcessOptions {
        group_by_columns: options.group_by_columns.clone(),
        spectrum_columns: if options.spectrum_statistic_column {
            options.columns_order.clone()
        } else {
            Vec::new()
        },
        sort_by: SortKey::ascending_all(&options.columns_order),
        highlight_groups: options.highlight_groups,
        bold_entire_row_of_lowest_value: false,
    };
    let mut result = process(&joined, &process_options);

    let output_columns = options.output_columns();
    table::remove_columns_except(&mut result, &output_columns);
    table::set_columns_order(&mut result, &output_columns);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::lock_settings_for_test;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn run(method: &str, job: &str, os: &str, mean: &str) -> Option<Row> {
        let mut row = Row::from_pairs([
            ("Method", method),
            ("Job", job),
            ("OS", os),
            ("Mean", mean),
            ("Error", "0.1 ns"),
        ]);
        row.set_columns_order(&["Method", "Job", "OS", "Mean", "Error"]);
        Some(row)
    }

    #[test]
    fn test_process_groups_highlights_colors_and_sorts() {
        let _guard = lock_settings_for_test();
        let rows = vec![
            run("B", "x", "Linux", "**20 ns**"),
            run("A", "y", "Linux", "5 ns"),
            run("C", "x", "Linux", "10 ns"),
        ];
        let options = ProcessOptions {
            group_by_columns: strings(&["Job"]),
            spectrum_columns: strings(&["Mean"]),
            sort_by: vec![SortKey::ascending("Mean")],
            ..ProcessOptions::default()
        };
        let out = process(&rows, &options);

        assert_eq!(out.len(), 4);
        assert!(out[2].is_none());
        let first = out[0].as_ref().unwrap();
        // C (10 ns) is the lowest of group x and the whole row is bolded
        assert_eq!(first.get_text("Method").as_deref(), Some("**C**"));
        assert_eq!(first.background_color("Job"), Some("#CCFFFF"));
        let second = out[1].as_ref().unwrap();
        assert_eq!(second.get_text("Mean").as_deref(), Some("20 ns"));
        let other_group = out[3].as_ref().unwrap();
        assert_eq!(other_group.background_color("Job"), Some("#FFCCFF"));
    }

    #[test]
    fn test_process_without_options_only_strips_bold() {
        let rows = vec![run("**A**", "x", "Linux", "1 ns"), None];
        let out = process(&rows, &ProcessOptions::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap().get_text("Method").as_deref(), Some("A"));
        // input untouched
        assert_eq!(rows[0].as_ref().unwrap().get_text("Method").as_deref(), Some("**A**"));
    }

    #[test]
    fn test_output_columns_dedup() {
        let mut options = JoinProcessOptions::new(
            "Method",
            strings(&["Job", "Method"]),
            "OS",
            "Mean",
            strings(&["Linux", "Windows"]),
        );
        options.other_columns_to_select = strings(&["Categories", "Job"]);
        assert_eq!(
            options.output_columns(),
            strings(&["Method", "Categories", "Job", "Linux", "Windows"])
        );
    }

    #[test]
    fn test_join_and_process_pivots_runs_side_by_side() {
        let _guard = lock_settings_for_test();
        let linux: Table = vec![run("Foo", "Default", "Linux", "10 ns"), run("Bar", "Default", "Linux", "30 ns")];
        let windows: Table = vec![run("Foo", "Default", "Windows", "12 ns"), run("Bar", "Default", "Windows", "40 ns")];

        let options = JoinProcessOptions::new(
            "Method",
            strings(&["Job"]),
            "OS",
            "Mean",
            strings(&["Linux", "Windows"]),
        );
        let out = join_and_process(&[linux, windows], &options);

        assert_eq!(out.len(), 2);
        let foo = out[0].as_ref().unwrap();
        assert_eq!(foo.columns_by_order(), vec!["Method", "Job", "Linux", "Windows"]);
        assert_eq!(foo.get_text("Linux").as_deref(), Some("**10 ns**"));
        assert_eq!(foo.get_text("Windows").as_deref(), Some("**12 ns**"));
        assert!(!foo.contains("Error"));
        assert!(!foo.contains("OS"));

        let bar = out[1].as_ref().unwrap();
        assert_eq!(bar.get_text("Method").as_deref(), Some("Bar"));
        assert_eq!(bar.get_text("Linux").as_deref(), Some("30 ns"));
    }

    #[test]
    fn test_join_process_options_json_defaults() {
        let options: JoinProcessOptions = serde_json::from_str(
            r#"{"mainColumn":"Method","groupByColumns":["Job"],"pivotColumn":"OS",
                "statisticColumn":"Mean","columnsOrder":["Linux"]}"#,
        )
        .unwrap();
        assert_eq!(options.other_columns_to_select, strings(&["Categories"]));
        assert!(options.spectrum_statistic_column);
        assert!(options.highlight_groups);
    }
}
