//! FILENAME: core/engine/src/markup.rs
//! PURPOSE: Markdown bold markup helpers (`**text**`).
//! CONTEXT: Bold markup travels in-band inside cell text. It is kept by the
//! Markdown parser, stripped before values are compared or keyed, and put
//! back by the spectrum colorizer on winning cells. Renderers turn it into
//! `<strong>` for HTML.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));

/// Removes every `**...**` pair, keeping the inner text.
pub fn remove_markdown_bold(text: &str) -> Cow<'_, str> {
    MARKDOWN_BOLD.replace_all(text, "$1")
}

/// Wraps the (bold-stripped) text in `**`.
pub fn set_markdown_bold(text: &str) -> String {
    format!("**{}**", remove_markdown_bold(text))
}

/// Whether the whole value is surrounded by `**`.
pub fn is_surrounded_by_markdown_bold(text: &str) -> bool {
    text.len() >= 4 && text.starts_with("**") && text.ends_with("**")
}

/// Replaces `**x**` with `<strong>x</strong>`.
pub fn markdown_bold_to_html(text: &str) -> Cow<'_, str> {
    MARKDOWN_BOLD.replace_all(text, "<strong>$1</strong>")
}
