//! FILENAME: core/persistence/src/markdown.rs
//! PURPOSE: Reads and writes GitHub-flavored Markdown tables.
//! CONTEXT: Benchmark tools export their results as a Markdown report: an
//! environment block in a code fence followed by the results table. Parsing
//! turns the table into rows (column order taken from the header); rendering
//! turns processed rows back into an aligned Markdown table.

use serde::{Deserialize, Serialize};

use engine::markup::is_surrounded_by_markdown_bold;
use engine::number_format::starts_with_number;
use engine::table::{self, Table};
use engine::{CellValue, Row};

use crate::{PersistenceError, RenderTableDividerMode};

/// What to do with an all-empty row while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ParseTableDividerMode {
    /// Emit a divider (`None`).
    #[default]
    PlaceNull,
    /// Skip the row.
    Ignore,
}

const CODE_FENCE: &str = "```";

// ============================================================================
// PARSING
// ============================================================================

/// Parses a Markdown table into rows.
///
/// The first line is the header, the second the separator; every following
/// line must have as many cells as the header. Cell text is trimmed, entities
/// are decoded, and surrounding single quotes are removed while surrounding
/// `**` is preserved.
pub fn parse_markdown_table(
    markdown: &str,
    divider_mode: ParseTableDividerMode,
) -> Result<Table, PersistenceError> {
    let lines: Vec<&str> = markdown
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 3 {
        return Err(PersistenceError::InvalidFormat(format!(
            "expected a header, a separator and at least one row, found {} line(s)",
            lines.len()
        )));
    }

    let headers: Vec<String> = split_cells(lines[0]).map(|h| h.trim().to_string()).collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let mut rows = Table::with_capacity(lines.len() - 2);

    for (index, line) in lines.iter().enumerate().skip(2) {
        let cells: Vec<&str> = split_cells(line).collect();
        if cells.len() != headers.len() {
            return Err(PersistenceError::InvalidFormat(format!(
                "line {} has {} cell(s) but the header has {}",
                index + 1,
                cells.len(),
                headers.len()
            )));
        }

        let mut row = Row::new();
        for (header, cell) in headers.iter().zip(cells) {
            row.set(header.as_str(), decode_cell(cell));
        }
        row.set_columns_order(&header_refs);

        if row.iter().all(|(_, value)| value.is_empty()) {
            match divider_mode {
                ParseTableDividerMode::PlaceNull => rows.push(None),
                ParseTableDividerMode::Ignore => {}
            }
        } else {
            rows.push(Some(row));
        }
    }

    Ok(rows)
}

fn split_cells(line: &str) -> impl Iterator<Item = &str> {
    line.trim().split('|').filter(|piece| !piece.is_empty())
}

/// Decodes each `&...;` entity on its own. Entities quick-xml does not know
/// (`&nbsp;`) stay as written without blocking the ones it does.
fn unescape_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let entity = candidate
            .find(';')
            .map(|end| &candidate[..=end])
            .filter(|entity| !entity[1..].contains('&'));

        match entity.and_then(|entity| quick_xml::escape::unescape(entity).ok().map(|text| (entity, text))) {
            Some((entity, text)) => {
                out.push_str(&text);
                rest = &candidate[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_cell(raw: &str) -> String {
    let mut value = raw.trim();
    let bold = is_surrounded_by_markdown_bold(value);
    if bold {
        value = value.trim_matches('*');
    }

    let decoded = unescape_entities(value);
    // Exported method names are quoted ('Foo') and the quotes arrive encoded.
    let decoded = decoded.trim_matches('\'');

    if bold {
        format!("**{}**", decoded)
    } else {
        decoded.to_string()
    }
}

/// Everything before the last code fence, without the fences.
pub fn extract_environment_info(markdown: &str) -> String {
    match markdown.rfind(CODE_FENCE) {
        Some(index) => markdown[..index]
            .trim_matches(|c: char| c == '`' || c.is_whitespace())
            .to_string(),
        None => String::new(),
    }
}

/// Everything after the last code fence.
pub fn extract_markdown_table(markdown: &str) -> String {
    match markdown.rfind(CODE_FENCE) {
        Some(index) => markdown[index + CODE_FENCE.len()..].trim().to_string(),
        None => markdown.trim().to_string(),
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Renders rows as an aligned Markdown table. Columns come from the first
/// row's display order; numeric columns get a right-alignment marker.
pub fn to_markdown_table(rows: &[Option<Row>], divider_mode: RenderTableDividerMode) -> String {
    let mut out = String::new();

    if divider_mode == RenderTableDividerMode::SeparateTables && table::has_null_divider(rows) {
        for segment in table::split_by_null(table::clone_table(rows)) {
            let segment: Table = segment.into_iter().map(Some).collect();
            render_markdown(&segment, divider_mode, &mut out);
        }
    } else {
        render_markdown(rows, divider_mode, &mut out);
    }

    out.trim_end_matches(['\r', '\n']).to_string()
}

fn render_markdown(rows: &[Option<Row>], divider_mode: RenderTableDividerMode, out: &mut String) {
    let columns = table::header_columns(rows);
    if columns.is_empty() {
        return;
    }

    let cell_text = |row: &Row, column: &str| row.get_text(column).unwrap_or_default();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows.iter().flatten() {
        for (width, column) in widths.iter_mut().zip(&columns) {
            *width = (*width).max(cell_text(row, column).chars().count());
        }
    }

    let numeric: Vec<bool> = columns
        .iter()
        .map(|column| {
            rows.iter()
                .flatten()
                .any(|row| row.get(column).is_some_and(looks_numeric))
        })
        .collect();

    let pad = |values: Vec<String>| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    out.push_str(&pad(columns.clone()));
    out.push('\n');

    let separators: Vec<String> = widths
        .iter()
        .zip(&numeric)
        .map(|(width, is_numeric)| format!("{}{}", "-".repeat(*width), if *is_numeric { ':' } else { ' ' }))
        .collect();
    out.push_str(&format!("| {}|", separators.join("| ")));
    out.push('\n');

    let mut lines: Vec<String> = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            Some(row) => lines.push(pad(columns.iter().map(|c| cell_text(row, c)).collect())),
            None if divider_mode == RenderTableDividerMode::Ignore => {}
            None => lines.push(pad(vec![String::new(); columns.len()])),
        }
    }
    out.push_str(&lines.join("\n"));
    out.push_str("\n\n");
}

/// Numbers, and text that starts with a digit once bold markup is removed.
pub(crate) fn looks_numeric(value: &CellValue) -> bool {
    match value {
        CellValue::Number(_) => true,
        CellValue::Text(text) => starts_with_number(text.trim_matches('*')),
        _ => false,
    }
}

pub fn wrap_in_code_block(code: &str, language: &str) -> String {
    format!("{CODE_FENCE}{language}\n{code}\n{CODE_FENCE}")
}
