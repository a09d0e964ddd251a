//! FILENAME: core/report-engine/src/spectrum.rs
//! PURPOSE: Paints statistic cells on a red-to-green spectrum.
//! CONTEXT: Within each group, the lowest value of a statistic column (the
//! fastest run, the smallest allocation) is painted green and bolded, and
//! larger values fade through yellow to red. Colors are stored in the row
//! metadata; bolding is both recorded in the metadata and applied inline.

use engine::markup::remove_markdown_bold;
use engine::number_format::extract_number_or_default;
use engine::style::Color;
use engine::table::{self, Table};
use engine::{CellValue, Row};

use crate::settings::{self, ReportSettings};

/// How far the ramp colors are mixed toward white.
const LIGHTEN_AMOUNT: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: f64,
    max: f64,
    diff: f64,
}

/// Colorizes one segment using the current global settings.
pub fn spectrum_columns(rows: Vec<Row>, columns: &[String], bold_entire_row: bool) -> Vec<Row> {
    spectrum_columns_with(rows, columns, bold_entire_row, &settings::settings())
}

/// Colorizes one segment.
///
/// For each column the values are bold-stripped (written back), parsed to
/// their leading number (0 when unparsable), and scored against the segment
/// range. Cells holding the segment minimum are bolded: the whole row when
/// `bold_entire_row` is set and the column is the first one, otherwise only
/// the cell.
pub fn spectrum_columns_with(
    mut rows: Vec<Row>,
    columns: &[String],
    bold_entire_row: bool,
    settings: &ReportSettings,
) -> Vec<Row> {
    if rows.is_empty() || columns.is_empty() {
        return rows;
    }

    let mut values: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    let mut ranges: Vec<Option<Range>> = Vec::with_capacity(columns.len());

    for column in columns {
        let column_values: Vec<Option<f64>> = rows
            .iter_mut()
            .map(|row| strip_and_parse(row, column))
            .collect();
        let present: Vec<f64> = column_values.iter().flatten().copied().collect();
        ranges.push(range_of(column, &present, settings));
        values.push(column_values);
    }

    for (index, row) in rows.iter_mut().enumerate() {
        for (c, column) in columns.iter().enumerate() {
            // Rows without the column are left uncolored
            let (Some(range), Some(value)) = (ranges[c], values[c][index]) else {
                continue;
            };
            let value = value.min(range.max);

            let score = if range.diff == 0.0 {
                1.0
            } else {
                (range.max - value) / range.diff
            };

            if value == range.min {
                if c == 0 && bold_entire_row {
                    table::set_row_markdown_bold_all(row);
                } else {
                    table::set_row_markdown_bold(row, &[column.as_str()]);
                }
            }

            let color = Color::between_red_and_green(score).lighten(LIGHTEN_AMOUNT);
            row.set_background_color(column, color.to_hex());
        }
    }

    rows
}

fn strip_and_parse(row: &mut Row, column: &str) -> Option<f64> {
    let value = row.get_mut(column)?;
    let text = remove_markdown_bold(&value.display_value()).into_owned();
    let number = extract_number_or_default(&text);
    if let CellValue::Text(existing) = value {
        *existing = text;
    }
    row.set_bold(column, false);
    Some(number)
}

fn range_of(column: &str, values: &[f64], settings: &ReportSettings) -> Option<Range> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = match settings.maximum_fn {
        Some(maximum) => maximum(column, values),
        None => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    let max = max.max(min * settings.spectrum_max_threshold);
    Some(Range {
        min,
        max,
        diff: max - min,
    })
}

/// Colorizes every divider-delimited segment independently.
pub fn split_by_null_and_spectrum_columns(
    rows: &[Option<Row>],
    columns: &[String],
    bold_entire_row: bool,
) -> Table {
    let settings = settings::settings();
    let segments = table::split_by_null(table::clone_table(rows));
    table::concat_by_null(
        segments
            .into_iter()
            .map(|segment| spectrum_columns_with(segment, columns, bold_entire_row, &settings))
            .collect(),
    )
}

/// Groups by `group_columns` and colorizes each group. Dividers separate the
/// groups in the output only if the input had any.
pub fn split_by_group_and_spectrum_columns(
    rows: &[Option<Row>],
    group_columns: &[String],
    columns: &[String],
    bold_entire_row: bool,
) -> Table {
    let settings = settings::settings();
    let had_dividers = table::has_null_divider(rows);
    let colored: Vec<Vec<Row>> = table::split_rows_by_group(table::clone_table(rows), group_columns)
        .into_iter()
        .map(|group| spectrum_columns_with(group, columns, bold_entire_row, &settings))
        .collect();

    if had_dividers {
        table::concat_by_null(colored)
    } else {
        colored.into_iter().flatten().map(Some).collect()
    }
}
