//! FILENAME: app/src/report.rs
//! PURPOSE: The public report pipelines: simple, join and concatenate.
//! CONTEXT: Each pipeline validates its options, runs the report tables
//! through `report_engine::process` (or `join_and_process`), and renders the
//! result with headings and the environment block. Markdown output carries
//! no colors, so spectrum and highlight are disabled there. Inputs are never
//! mutated.

use std::path::Path;

use engine::split;
use engine::table::Table;
use persistence::{html, markdown, save_text, BenchmarkInfo};
use report_engine::{join_and_process, process, JoinProcessOptions, ProcessOptions, SortKey};

use crate::error::{ConfigError, Result};
use crate::logging::{log_debug, log_enter, log_exit};
use crate::options::{ConcatReportOptions, JoinReportOptions, ReportOptions};

const LOG_CAT: &str = "REPORT";
const CODE_LANGUAGE: &str = "text";

// ============================================================================
// PROCESS OPTIONS
// ============================================================================

fn markdown_process_options(group_by_columns: &[String], sort_by_columns: &[String]) -> ProcessOptions {
    ProcessOptions {
        group_by_columns: group_by_columns.to_vec(),
        spectrum_columns: Vec::new(),
        sort_by: SortKey::ascending_all(sort_by_columns),
        highlight_groups: false,
        bold_entire_row_of_lowest_value: true,
    }
}

fn html_process_options(
    group_by_columns: &[String],
    spectrum_columns: &[String],
    sort_by_columns: &[String],
    highlight_groups: bool,
) -> ProcessOptions {
    let sort_columns = if sort_by_columns.is_empty() {
        spectrum_columns
    } else {
        sort_by_columns
    };
    ProcessOptions {
        group_by_columns: group_by_columns.to_vec(),
        spectrum_columns: spectrum_columns.to_vec(),
        sort_by: SortKey::ascending_all(sort_columns),
        highlight_groups,
        bold_entire_row_of_lowest_value: true,
    }
}

fn join_process_options(options: &JoinReportOptions, statistic_column: &str, colored: bool) -> JoinProcessOptions {
    JoinProcessOptions {
        main_column: options.main_column.clone(),
        group_by_columns: options.group_by_columns.clone(),
        pivot_column: options.pivot_column.clone(),
        statistic_column: statistic_column.to_string(),
        columns_order: options.columns_order.clone(),
        other_columns_to_select: options.other_columns_to_select.clone(),
        spectrum_statistic_column: colored && options.spectrum_statistic_column,
        highlight_groups: colored && options.highlight_groups,
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn require_reports(infos: &[BenchmarkInfo]) -> std::result::Result<&BenchmarkInfo, ConfigError> {
    infos.first().ok_or(ConfigError::EmptyList("reports"))
}

/// Reports sharing a group name, in order of first appearance.
fn group_by_name(infos: &[BenchmarkInfo]) -> Vec<Vec<&BenchmarkInfo>> {
    split::split_by_group(infos.iter(), |info| info.group_name.clone())
}

fn group_tables(group: &[&BenchmarkInfo]) -> Vec<Table> {
    group.iter().map(|info| info.clone_table()).collect()
}

fn comparison_heading(statistic_column: &str) -> String {
    format!("Comparison: {}", statistic_column)
}

/// A single statistic names the whole group; several get their own sub-headings.
fn group_heading(options: &JoinReportOptions, group_name: &str) -> String {
    match options.statistic_columns.as_slice() {
        [single] => comparison_heading(single),
        _ => group_name.to_string(),
    }
}

fn finish_html(body: &str, title: &str, theme: persistence::Theme, wrap_mode: persistence::HtmlWrapMode) -> String {
    html::wrap_in_html_document(body.trim_end_matches(['\r', '\n']), title, theme, wrap_mode)
}

// ============================================================================
// SIMPLE REPORT
// ============================================================================

pub fn report_markdown(info: &BenchmarkInfo, options: &ReportOptions) -> Result<String> {
    log_enter!(LOG_CAT, "report_markdown", "display_name={}", info.display_name);
    options.validate()?;

    let mut out = String::new();
    push_line(&mut out, &format!("# {}", options.title));
    push_line(&mut out, "");
    push_line(&mut out, &markdown::wrap_in_code_block(&info.environment_info, CODE_LANGUAGE));
    push_line(&mut out, "");
    push_line(&mut out, &format!("## {}", info.display_name));
    push_line(&mut out, "");

    let result = process(
        &info.table,
        &markdown_process_options(&options.group_by_columns, &options.sort_by_columns),
    );
    push_line(&mut out, &markdown::to_markdown_table(&result, options.divider_mode));
    push_line(&mut out, "");

    log_exit!(LOG_CAT, "report_markdown", "rows={}", result.len());
    Ok(out)
}

pub fn report_html(info: &BenchmarkInfo, options: &ReportOptions) -> Result<String> {
    log_enter!(LOG_CAT, "report_html", "display_name={}", info.display_name);
    options.validate_html()?;

    let mut body = String::new();
    push_line(&mut body, &format!("<h1>{}</h1>", options.title));
    push_line(&mut body, &html::wrap_in_code_block(&info.environment_info));
    push_line(&mut body, &format!("<h2>{}</h2>", info.display_name));

    let result = process(
        &info.table,
        &html_process_options(
            &options.group_by_columns,
            &options.spectrum_columns,
            &options.sort_by_columns,
            options.highlight_groups,
        ),
    );
    push_line(&mut body, &html::to_html_table(&result, options.divider_mode));

    log_exit!(LOG_CAT, "report_html", "rows={}", result.len());
    Ok(finish_html(&body, &options.title, options.theme, options.html_wrap_mode))
}

pub fn save_report_markdown(info: &BenchmarkInfo, path: impl AsRef<Path>, options: &ReportOptions) -> Result<()> {
    let text = report_markdown(info, options)?;
    save_text(path, &text)?;
    Ok(())
}

pub fn save_report_html(info: &BenchmarkInfo, path: impl AsRef<Path>, options: &ReportOptions) -> Result<()> {
    let text = report_html(info, options)?;
    save_text(path, &text)?;
    Ok(())
}

// ============================================================================
// JOIN REPORT
// ============================================================================

/// Puts runs of the same benchmarks side by side, one comparison table per
/// statistic column and report group. The environment of the first report
/// is printed once.
pub fn join_reports_markdown(infos: &[BenchmarkInfo], options: &JoinReportOptions) -> Result<String> {
    log_enter!(LOG_CAT, "join_reports_markdown", "reports={}", infos.len());
    options.validate()?;
    let first = require_reports(infos)?;

    let mut out = String::new();
    push_line(&mut out, &format!("# {}", options.title));
    push_line(&mut out, "");
    push_line(&mut out, &markdown::wrap_in_code_block(&first.environment_info, CODE_LANGUAGE));
    push_line(&mut out, "");

    for group in group_by_name(infos) {
        push_line(&mut out, &format!("## {}", group_heading(options, &group[0].group_name)));
        push_line(&mut out, "");

        let tables = group_tables(&group);
        for statistic_column in &options.statistic_columns {
            let result = join_and_process(&tables, &join_process_options(options, statistic_column, false));
            log_debug!(LOG_CAT, "joined {} table(s) on {}: {} rows", tables.len(), statistic_column, result.len());

            if options.statistic_columns.len() > 1 {
                push_line(&mut out, &format!("### {}", comparison_heading(statistic_column)));
                push_line(&mut out, "");
            }
            push_line(&mut out, &markdown::to_markdown_table(&result, options.divider_mode));
            push_line(&mut out, "");
        }
    }

    log_exit!(LOG_CAT, "join_reports_markdown");
    Ok(out)
}

pub fn join_reports_html(infos: &[BenchmarkInfo], options: &JoinReportOptions) -> Result<String> {
    log_enter!(LOG_CAT, "join_reports_html", "reports={}", infos.len());
    options.validate_html()?;
    let first = require_reports(infos)?;

    let mut body = String::new();
    push_line(&mut body, &format!("<h1>{}</h1>", options.title));
    push_line(&mut body, &html::wrap_in_code_block(&first.environment_info));

    for group in group_by_name(infos) {
        push_line(&mut body, &format!("<h2>{}</h2>", group_heading(options, &group[0].group_name)));

        let tables = group_tables(&group);
        for statistic_column in &options.statistic_columns {
            let result = join_and_process(&tables, &join_process_options(options, statistic_column, true));
            log_debug!(LOG_CAT, "joined {} table(s) on {}: {} rows", tables.len(), statistic_column, result.len());

            if options.statistic_columns.len() > 1 {
                push_line(&mut body, &format!("<h3>{}</h3>", comparison_heading(statistic_column)));
            }
            push_line(&mut body, &html::to_html_table(&result, options.divider_mode));
        }
    }

    log_exit!(LOG_CAT, "join_reports_html");
    Ok(finish_html(&body, &options.title, options.theme, options.html_wrap_mode))
}

pub fn save_join_reports_markdown(
    infos: &[BenchmarkInfo],
    path: impl AsRef<Path>,
    options: &JoinReportOptions,
) -> Result<()> {
    let text = join_reports_markdown(infos, options)?;
    save_text(path, &text)?;
    Ok(())
}

pub fn save_join_reports_html(
    infos: &[BenchmarkInfo],
    path: impl AsRef<Path>,
    options: &JoinReportOptions,
) -> Result<()> {
    let text = join_reports_html(infos, options)?;
    save_text(path, &text)?;
    Ok(())
}

// ============================================================================
// CONCATENATE REPORT
// ============================================================================

/// A group holding a single report named like the group needs no sub-heading.
fn needs_item_heading(group: &[&BenchmarkInfo], info: &BenchmarkInfo) -> bool {
    !(group.len() == 1 && group[0].group_name == info.display_name)
}

/// Lists reports one after another, grouped by group name.
pub fn concat_reports_markdown(infos: &[BenchmarkInfo], options: &ConcatReportOptions) -> Result<String> {
    log_enter!(LOG_CAT, "concat_reports_markdown", "reports={}", infos.len());
    options.validate()?;
    let first = require_reports(infos)?;

    let mut out = String::new();
    push_line(&mut out, &format!("# {}", options.title));
    push_line(&mut out, "");

    if options.environment_once {
        push_line(&mut out, &markdown::wrap_in_code_block(&first.environment_info, CODE_LANGUAGE));
        push_line(&mut out, "");
    }

    let process_options = markdown_process_options(&options.group_by_columns, &options.sort_by_columns);
    for group in group_by_name(infos) {
        push_line(&mut out, &format!("## {}", group[0].group_name));
        push_line(&mut out, "");

        for info in &group {
            if needs_item_heading(&group, info) {
                push_line(&mut out, &format!("### {}", info.display_name));
                push_line(&mut out, "");
            }
            if !options.environment_once {
                push_line(&mut out, &markdown::wrap_in_code_block(&info.environment_info, CODE_LANGUAGE));
                push_line(&mut out, "");
            }

            let result = process(&info.table, &process_options);
            push_line(&mut out, &markdown::to_markdown_table(&result, options.divider_mode));
            push_line(&mut out, "");
        }
    }

    log_exit!(LOG_CAT, "concat_reports_markdown");
    Ok(out)
}

pub fn concat_reports_html(infos: &[BenchmarkInfo], options: &ConcatReportOptions) -> Result<String> {
    log_enter!(LOG_CAT, "concat_reports_html", "reports={}", infos.len());
    options.validate_html()?;
    let first = require_reports(infos)?;

    let mut body = String::new();
    push_line(&mut body, &format!("<h1>{}</h1>", options.title));

    if options.environment_once {
        push_line(&mut body, &html::wrap_in_code_block(&first.environment_info));
    }

    let process_options = html_process_options(
        &options.group_by_columns,
        &options.spectrum_columns,
        &options.sort_by_columns,
        options.highlight_groups,
    );
    for group in group_by_name(infos) {
        push_line(&mut body, &format!("<h2>{}</h2>", group[0].group_name));

        for info in &group {
            if needs_item_heading(&group, info) {
                push_line(&mut body, &format!("<h3>{}</h3>", info.display_name));
            }
            if !options.environment_once {
                push_line(&mut body, &html::wrap_in_code_block(&info.environment_info));
            }

            let result = process(&info.table, &process_options);
            push_line(&mut body, &html::to_html_table(&result, options.divider_mode));
        }
    }

    log_exit!(LOG_CAT, "concat_reports_html");
    Ok(finish_html(&body, &options.title, options.theme, options.html_wrap_mode))
}

pub fn save_concat_reports_markdown(
    infos: &[BenchmarkInfo],
    path: impl AsRef<Path>,
    options: &ConcatReportOptions,
) -> Result<()> {
    let text = concat_reports_markdown(infos, options)?;
    save_text(path, &text)?;
    Ok(())
}

pub fn save_concat_reports_html(
    infos: &[BenchmarkInfo],
    path: impl AsRef<Path>,
    options: &ConcatReportOptions,
) -> Result<()> {
    let text = concat_reports_html(infos, options)?;
    save_text(path, &text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Row;

    fn info(display: &str, group: &str) -> BenchmarkInfo {
        let mut row = Row::from_pairs([("Method", "Foo"), ("Mean", "10 ns")]);
        row.set_columns_order(&["Method", "Mean"]);
        BenchmarkInfo::new(display, group, "env", vec![Some(row)])
    }

    #[test]
    fn test_html_sort_falls_back_to_spectrum_columns() {
        let spectrum = vec!["Mean".to_string()];
        let options = html_process_options(&[], &spectrum, &[], true);
        assert_eq!(options.sort_by, vec![SortKey::ascending("Mean")]);

        let sort = vec!["Method".to_string()];
        let options = html_process_options(&[], &spectrum, &sort, true);
        assert_eq!(options.sort_by, vec![SortKey::ascending("Method")]);
    }

    #[test]
    fn test_markdown_never_colors() {
        let options = markdown_process_options(&["Job".to_string()], &[]);
        assert!(options.spectrum_columns.is_empty());
        assert!(!options.highlight_groups);
    }

    #[test]
    fn test_group_by_name_keeps_first_appearance_order() {
        let infos = vec![info("A", "g2"), info("B", "g1"), info("C", "g2")];
        let groups = group_by_name(&infos);
        let names: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|i| i.display_name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["A", "C"], vec!["B"]]);
    }

    #[test]
    fn test_item_heading_skipped_for_lone_namesake() {
        let infos = vec![info("Same", "Same")];
        let groups = group_by_name(&infos);
        assert!(!needs_item_heading(&groups[0], &infos[0]));

        let infos = vec![info("Other", "Group")];
        let groups = group_by_name(&infos);
        assert!(needs_item_heading(&groups[0], &infos[0]));
    }

    #[test]
    fn test_empty_report_list_is_rejected() {
        let options = ConcatReportOptions::new("T");
        let result = concat_reports_markdown(&[], &options);
        assert!(matches!(
            result,
            Err(crate::error::VisualizerError::Config(ConfigError::EmptyList("reports")))
        ));
    }
}
