//! FILENAME: tests/test_properties.rs
//! End-to-end checks of the row transformation primitives.

mod common;

use benchviz::{Row, Table};
use common::{column_texts, ordered_row, rows_only, strings};
use engine::markup::remove_markdown_bold;
use engine::split;
use engine::style::Color;
use pivot_engine::{join_collections_together, pivot_table, JoinSpec, PivotSpec};
use report_engine::{
    add_null_divider_between_groups, join_and_process, sort_rows, spectrum_columns_with, JoinProcessOptions,
    ReportSettings, SortKey,
};

fn color_of(row: &Row, column: &str) -> Color {
    Color::from_hex(row.background_color(column).unwrap()).unwrap()
}

/// How far a ramp color leans toward green rather than red.
fn greenness(color: Color) -> i32 {
    color.g as i32 - color.r as i32
}

// ============================================================================
// GROUPING
// ============================================================================

#[test]
fn test_split_by_group_then_concat_keeps_every_row_contiguously() {
    let items = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)];
    let groups = split::split_by_group(items.clone(), |(key, _)| *key);
    let flat = split::concat(groups);

    let mut sorted_in = items.clone();
    let mut sorted_out = flat.clone();
    sorted_in.sort();
    sorted_out.sort();
    assert_eq!(sorted_in, sorted_out);

    assert_eq!(flat, vec![("a", 1), ("a", 3), ("b", 2), ("b", 5), ("c", 4)]);
}

#[test]
fn test_dividers_between_groups() {
    let table: Table = ["x", "y", "x", "z", "y"]
        .iter()
        .map(|job| Some(Row::from_pairs([("Job", *job)])))
        .collect();

    let divided = add_null_divider_between_groups(&table, &strings(&["Job"]));
    assert_eq!(divided.iter().filter(|row| row.is_none()).count(), 2);
    assert_eq!(divided.len(), 7);
}

// ============================================================================
// SPECTRUM
// ============================================================================

#[test]
fn test_spectrum_marks_the_lowest_value() {
    let rows: Vec<Row> = ["10", "20", "30"]
        .iter()
        .map(|mean| Row::from_pairs([("Mean", *mean)]))
        .collect();
    let out = spectrum_columns_with(rows, &strings(&["Mean"]), false, &ReportSettings::default());

    assert_eq!(out[0].get_text("Mean").as_deref(), Some("**10**"));
    assert!(!out[2].is_bold("Mean"));

    let lowest = color_of(&out[0], "Mean");
    let highest = color_of(&out[2], "Mean");
    assert!(lowest.r < highest.r);
    assert!(lowest.g > highest.g);
    assert!(greenness(lowest) > greenness(highest));
}

#[test]
fn test_spectrum_twice_the_minimum_is_not_clamped() {
    let rows: Vec<Row> = ["10", "20"].iter().map(|mean| Row::from_pairs([("Mean", *mean)])).collect();
    let out = spectrum_columns_with(rows, &strings(&["Mean"]), false, &ReportSettings::default());
    assert_eq!(out[1].background_color("Mean"), Some("#FF9999"));
    assert!(greenness(color_of(&out[0], "Mean")) > greenness(color_of(&out[1], "Mean")));
}

#[test]
fn test_spectrum_threshold_keeps_close_values_green() {
    // max(11, 10 * 2) = 20: 11 is barely off the minimum
    let rows: Vec<Row> = ["10", "11"].iter().map(|mean| Row::from_pairs([("Mean", *mean)])).collect();
    let out = spectrum_columns_with(rows, &strings(&["Mean"]), false, &ReportSettings::default());
    let close = color_of(&out[1], "Mean");
    assert_eq!(close.g, 255);
}

// ============================================================================
// PIVOT / JOIN
// ============================================================================

#[test]
fn test_pivot_table_collapses_runtimes() {
    let table: Table = vec![
        Some(ordered_row(&[("Method", "A"), ("Runtime", "Net6"), ("Mean", "10ns")])),
        Some(ordered_row(&[("Method", "A"), ("Runtime", "Net8"), ("Mean", "8ns")])),
    ];
    let rows = pivot_table(&table, &strings(&["Method"]), &PivotSpec::new("Runtime", "Mean"));

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get_text("Method").as_deref(), Some("A"));
    assert_eq!(row.get_text("Net6").as_deref(), Some("10ns"));
    assert_eq!(row.get_text("Net8").as_deref(), Some("8ns"));
    assert!(!row.contains("Runtime"));
    assert!(!row.contains("Mean"));
}

#[test]
fn test_join_without_common_keys_is_empty_both_ways() {
    let left: Table = vec![Some(Row::from_pairs([("K", "a")]))];
    let right: Table = vec![Some(Row::from_pairs([("K", "b")]))];
    let spec = JoinSpec::new(strings(&["K"]), Vec::new());

    let forward = join_collections_together(&[left, right], &spec);
    assert!(forward.is_empty());

    let left: Table = vec![Some(Row::from_pairs([("K", "a")]))];
    let right: Table = vec![Some(Row::from_pairs([("K", "b")]))];
    let backward = join_collections_together(&[right, left], &spec);
    assert!(backward.is_empty());
}

// ============================================================================
// SORT
// ============================================================================

#[test]
fn test_stable_ascending_sort() {
    let rows: Vec<Row> = [("x", "5"), ("y", "5"), ("z", "3")]
        .iter()
        .map(|(name, value)| Row::from_pairs([("Name", *name), ("Value", *value)]))
        .collect();
    let sorted = sort_rows(rows, &[SortKey::ascending("Value")]);
    let names: Vec<String> = sorted.iter().filter_map(|r| r.get_text("Name")).collect();
    assert_eq!(names, vec!["z", "x", "y"]);
}

// ============================================================================
// JOIN AND PROCESS
// ============================================================================

fn run(os: &str, mean: &str) -> Table {
    vec![Some(ordered_row(&[("Method", "Foo"), ("Job", "Default"), ("OS", os), ("Mean", mean)]))]
}

fn os_options() -> JoinProcessOptions {
    JoinProcessOptions::new("Method", strings(&["Job"]), "OS", "Mean", strings(&["Linux", "Windows"]))
}

#[test]
fn test_join_and_process_compares_operating_systems() {
    let out = join_and_process(&[run("Linux", "10ns"), run("Windows", "12ns")], &os_options());

    let rows = rows_only(out);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.columns_by_order(), vec!["Method", "Job", "Linux", "Windows"]);
    assert_eq!(row.get_text("Method").as_deref(), Some("Foo"));
    assert_eq!(remove_markdown_bold(&row.get_text("Linux").unwrap()), "10ns");
    assert_eq!(remove_markdown_bold(&row.get_text("Windows").unwrap()), "12ns");

    // Each column is colored within its own group, so a lone row is the best
    // of both columns and both cells get the green end.
    assert_eq!(row.background_color("Linux"), Some("#99FF99"));
    assert_eq!(row.background_color("Windows"), Some("#99FF99"));
}

#[test]
fn test_join_and_process_linux_greener_when_windows_has_a_faster_peer() {
    let mut linux = run("Linux", "10ns");
    linux.push(Some(ordered_row(&[("Method", "Bar"), ("Job", "Default"), ("OS", "Linux"), ("Mean", "30ns")])));
    let mut windows = run("Windows", "12ns");
    windows.push(Some(ordered_row(&[("Method", "Bar"), ("Job", "Default"), ("OS", "Windows"), ("Mean", "11ns")])));

    let out = join_and_process(&[linux, windows], &os_options());
    assert_eq!(
        column_texts(&out, "Method"),
        vec![Some("Foo".to_string()), Some("Bar".to_string())]
    );

    let foo = out[0].as_ref().unwrap();
    let linux_color = color_of(foo, "Linux");
    let windows_color = color_of(foo, "Windows");
    // Windows 12ns scores (22 - 12) / 11 against its 11ns peer
    assert_eq!(linux_color.to_hex(), "#99FF99");
    assert_eq!(windows_color.to_hex(), "#BBFF99");
    assert!(greenness(linux_color) > greenness(windows_color));
}
