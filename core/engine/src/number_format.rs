//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Reads the leading numeric token out of benchmark cell text.
//! CONTEXT: Benchmark statistics arrive as display strings such as
//! "1,234.56 ns" or "12.3 KB". The report pipeline never does arithmetic on
//! them beyond comparing magnitudes, so all it needs is the first number.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTRACT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d,]+(?:\.\d+)?").expect("valid number regex"));

static STARTS_WITH_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d").expect("valid leading digit regex"));

/// Extracts the first number in the text. Thousands separators are ignored.
/// Returns None when the text holds no parsable number.
pub fn try_extract_number(input: &str) -> Option<f64> {
    if input.trim().is_empty() {
        return None;
    }

    let token = EXTRACT_NUMBER.find(input)?.as_str().replace(',', "");
    token.parse::<f64>().ok()
}

/// Same as `try_extract_number` but falls back to 0.
pub fn extract_number_or_default(input: &str) -> f64 {
    try_extract_number(input).unwrap_or(0.0)
}

/// Whether the text starts with a digit.
pub fn starts_with_number(input: &str) -> bool {
    STARTS_WITH_NUMBER.is_match(input)
}
