//! Field parsing utilities for vendor CSV cells
//!
//! Numeric cells are parsed permissively: a leading number is accepted even with
//! trailing text (`"85%"` reads as 85), and anything else becomes null instead of
//! failing the row. Dates accept the ISO, US and long-month spellings the vendors
//! export; wall-clock times without an offset are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid numeric prefix pattern")
});

/// Date-time layouts, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
    "%b %d, %Y %H:%M:%S",
];

/// Date-only layouts, tried in order; two-digit years before four-digit ones
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%y", "%m/%d/%Y", "%b %d, %Y"];

/// Outcome of coercing one numeric cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericCell {
    /// Empty or whitespace-only cell
    Blank,
    Value(f64),
    /// Non-empty cell with no usable number
    Unparseable,
}

/// Coerce a cell to a finite number
pub fn parse_numeric(raw: &str) -> NumericCell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NumericCell::Blank;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return NumericCell::Value(value);
        }
    }

    NUMERIC_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map_or(NumericCell::Unparseable, NumericCell::Value)
}

/// Parse a vendor date or date-time string to epoch milliseconds
///
/// Returns `None` for blank or unrecognized input.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.timestamp_millis());
    }

    if let Some(naive) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(naive.and_utc().timestamp_millis());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}
