//! FILENAME: core/persistence/src/html.rs
//! PURPOSE: Renders report rows as HTML tables and wraps them in a document.
//! CONTEXT: Background colors and bold flags produced by the report engine
//! only show up in HTML. Cell values are escaped, then Markdown bold is
//! turned into `<strong>`.

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use engine::markup::markdown_bold_to_html;
use engine::style::TextAlign;
use engine::table::{self, Table};
use engine::Row;

use crate::RenderTableDividerMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// How a rendered table is wrapped into a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HtmlWrapMode {
    /// Plain table.
    #[default]
    Simple,
    /// Interactive table using the DataTables library.
    RichDataTables,
}

const DATATABLES_CSS: &str = "https://cdn.datatables.net/2.0.8/css/dataTables.dataTables.min.css";
const JQUERY_JS: &str = "https://code.jquery.com/jquery-3.7.1.min.js";
const DATATABLES_JS: &str = "https://cdn.datatables.net/2.0.8/js/dataTables.min.js";

// ============================================================================
// TABLES
// ============================================================================

pub fn to_html_table(rows: &[Option<Row>], divider_mode: RenderTableDividerMode) -> String {
    let mut out = String::new();

    if divider_mode == RenderTableDividerMode::SeparateTables && table::has_null_divider(rows) {
        for segment in table::split_by_null(table::clone_table(rows)) {
            let segment: Table = segment.into_iter().map(Some).collect();
            render_html(&segment, divider_mode, &mut out);
        }
    } else {
        render_html(rows, divider_mode, &mut out);
    }

    out.trim_end_matches(['\r', '\n']).to_string()
}

fn render_html(rows: &[Option<Row>], divider_mode: RenderTableDividerMode, out: &mut String) {
    let columns = table::header_columns(rows);
    if columns.is_empty() {
        return;
    }

    out.push_str("<table>\n<thead>\n<tr>\n");
    for column in &columns {
        out.push_str(&format!("<th>{}</th>", escape(column.as_str())));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        match row {
            Some(row) => render_row(row, &columns, out),
            None if divider_mode == RenderTableDividerMode::Ignore => {}
            None => {
                // The second row keeps zebra striping aligned after the divider.
                out.push_str(&format!(
                    "<tr class=\"divider\">\n<td colspan=\"{}\">&nbsp;</td>\n</tr>\n",
                    columns.len()
                ));
                out.push_str(&format!(
                    "<tr class=\"divider\">\n<td colspan=\"{}\"></td>\n</tr>\n",
                    columns.len()
                ));
            }
        }
    }

    out.push_str("</tbody>\n</table>\n\n");
}

fn render_row(row: &Row, columns: &[String], out: &mut String) {
    out.push_str("<tr>\n");
    for column in columns {
        let raw = row.get_text(column).unwrap_or_default();
        let value = escape(raw.as_str()).into_owned();

        let mut styles: Vec<String> = Vec::new();
        if let Some(align) = TextAlign::for_text(&value).to_css() {
            styles.push(format!("text-align: {}", align));
        }
        let background = row.background_color(column);
        if let Some(color) = background {
            styles.push(format!("background-color: {}", color));
        }

        out.push_str("<td");
        if !styles.is_empty() {
            out.push_str(&format!(" style=\"{}\"", styles.join("; ")));
        }
        if background.is_some() {
            out.push_str(" hasBackground");
        }
        out.push('>');
        out.push_str(&markdown_bold_to_html(&value));
        out.push_str("</td>\n");
    }
    out.push_str("</tr>\n");
}

// ============================================================================
// DOCUMENTS
// ============================================================================

/// Wraps `body` in a minimal standalone page.
pub fn wrap_in_html_document(body: &str, title: &str, theme: Theme, wrap_mode: HtmlWrapMode) -> String {
    let (background, foreground, border, colored_text) = match theme {
        Theme::Dark => ("#0D1117", "#E6EDF3", "#30363D", "#0D1117"),
        Theme::Light => ("#FFFFFF", "#1F2328", "#D0D7DE", "#1F2328"),
    };

    let mut head = String::new();
    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str(&format!("<title>{}</title>\n", escape(title)));
    if wrap_mode == HtmlWrapMode::RichDataTables {
        head.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", DATATABLES_CSS));
        head.push_str(&format!("<script src=\"{}\"></script>\n", JQUERY_JS));
        head.push_str(&format!("<script src=\"{}\"></script>\n", DATATABLES_JS));
    }
    head.push_str(&format!(
        "<style>\n\
         body {{ background-color: {background}; color: {foreground}; font-family: sans-serif; }}\n\
         table {{ border-collapse: collapse; margin-bottom: 1em; }}\n\
         th, td {{ border: 1px solid {border}; padding: 4px 8px; text-align: right; }}\n\
         td[hasBackground] {{ color: {colored_text}; }}\n\
         tr.divider td {{ border: none; }}\n\
         </style>\n"
    ));

    let mut document = String::new();
    document.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    document.push_str(&head);
    document.push_str("</head>\n<body>\n");
    document.push_str(body);
    document.push('\n');
    if wrap_mode == HtmlWrapMode::RichDataTables {
        document.push_str("<script>\n$(function () { $('table').DataTable({ paging: false }); });\n</script>\n");
    }
    document.push_str("</body>\n</html>");
    document
}

pub fn wrap_in_code_block(code: &str) -> String {
    format!("<pre>\n<code>\n{}\n</code>\n</pre>", code)
}
