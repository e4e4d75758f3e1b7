//! Dates as they appear in infobox rows.
//!
//! Birth and death rows carry a machine-friendly copy of the date in
//! parentheses ahead of the human text, e.g.
//! `(1879-03-14)14 March 1879 Ulm, Kingdom of Württemberg`.
//! [`extract_date`] reads that first parenthesized span.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ScanError;

/// Token shapes paired with the `chrono` format that reads them. The shape
/// check keeps `chrono`'s variable-width fields from splitting a year, so
/// `March 1879` is rejected instead of read as day 18 of year 79. `%B` also
/// accepts the abbreviated month name.
static DATE_SHAPES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^\d{1,4}-\d{1,2}-\d{1,2}$", "%Y-%m-%d"),
        (r"^\d{1,4}/\d{1,2}/\d{1,2}$", "%Y/%m/%d"),
        (r"^\d{1,2} \p{L}+ \d{1,4}$", "%d %B %Y"),
        (r"^\p{L}+ \d{1,2} \d{1,4}$", "%B %d %Y"),
        (r"^\d{1,4} \p{L}+ \d{1,2}$", "%Y %B %d"),
    ]
    .into_iter()
    .map(|(shape, fmt)| (Regex::new(shape).expect("date shape regex is valid"), fmt))
    .collect()
});

static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal regex is valid")
});

/// Text strictly between the first `(` and the first `)` after it.
pub fn parenthesized(text: &str) -> Result<&str, ScanError> {
    let open = text.find('(').ok_or_else(|| ScanError::DateParse {
        input: text.to_string(),
        reason: "no opening parenthesis".into(),
    })?;
    let rest = &text[open + 1..];
    let close = rest.find(')').ok_or_else(|| ScanError::DateParse {
        input: text.to_string(),
        reason: "no closing parenthesis".into(),
    })?;
    Ok(&rest[..close])
}

fn normalize(expr: &str) -> String {
    let without_ordinals = ORDINAL_SUFFIX.replace_all(expr, "$1");
    without_ordinals
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a free-form date such as `1879-03-14`, `14 March 1879`,
/// `March 14th, 1879` or `18 Apr 1955`.
pub fn parse_date(expr: &str) -> Result<NaiveDate, ScanError> {
    let normalized = normalize(expr);
    if normalized.is_empty() {
        return Err(ScanError::DateParse {
            input: expr.to_string(),
            reason: "empty date expression".into(),
        });
    }

    DATE_SHAPES
        .iter()
        .filter(|(shape, _)| shape.is_match(&normalized))
        .find_map(|(_, fmt)| NaiveDate::parse_from_str(&normalized, fmt).ok())
        .ok_or_else(|| ScanError::DateParse {
            input: expr.to_string(),
            reason: "unrecognized date format".into(),
        })
}

/// Date held in the first parenthesized span of an infobox row.
pub fn extract_date(row_text: &str) -> Result<NaiveDate, ScanError> {
    parse_date(parenthesized(row_text)?)
}
