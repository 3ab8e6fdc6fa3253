//! Parsing statistics and result structures for vendor CSV processing
//!
//! Parsing never fails on a bad cell or a bad date; those rows are coerced or
//! dropped. The statistics here make that visible to callers who want to
//! surface warnings or apply a stricter policy on top.

use std::fmt;

use crate::app::models::ParsedFile;

/// Parsing result with the parsed file and its diagnostics
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub file: ParsedFile,
    pub stats: ParseStats,
}

/// Why a row or cell was not taken at face value
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WarningKind {
    /// Row had no date; dropped
    MissingDate,
    /// Date text could not be parsed; row dropped
    UnparseableDate { value: String },
    /// Non-empty numeric cell stored as null
    CoercedNumeric { field: String, value: String },
}

/// A diagnostic tied to a 1-based grid row
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseWarning {
    pub row: usize,
    pub kind: WarningKind,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::MissingDate => write!(f, "Row {}: missing date, row skipped", self.row),
            WarningKind::UnparseableDate { value } => {
                write!(f, "Row {}: unparseable date '{}', row skipped", self.row, value)
            }
            WarningKind::CoercedNumeric { field, value } => write!(
                f,
                "Row {}: '{}' value '{}' is not numeric, stored as null",
                self.row, field, value
            ),
        }
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Grid rows after the header
    pub total_rows: usize,

    /// Records kept in the output
    pub records_parsed: usize,

    /// Rows skipped because the first cell was blank
    pub blank_rows: usize,

    /// Rows dropped for a missing or unparseable date
    pub dropped_rows: usize,

    /// Numeric cells coerced to null
    pub coerced_values: usize,

    /// Per-row details, in file order
    pub warnings: Vec<ParseWarning>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and bump the matching counter
    pub fn add_warning(&mut self, row: usize, kind: WarningKind) {
        match kind {
            WarningKind::MissingDate | WarningKind::UnparseableDate { .. } => {
                self.dropped_rows += 1
            }
            WarningKind::CoercedNumeric { .. } => self.coerced_values += 1,
        }
        self.warnings.push(ParseWarning { row, kind });
    }

    /// Share of non-blank rows that became records, as a percentage
    pub fn success_rate(&self) -> f64 {
        let candidates = self.total_rows.saturating_sub(self.blank_rows);
        if candidates == 0 {
            100.0
        } else {
            (self.records_parsed as f64 / candidates as f64) * 100.0
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// One-line summary for logs and CLI output
    pub fn summary(&self) -> String {
        format!(
            "{} records from {} rows ({} blank, {} dropped, {} values coerced)",
            self.records_parsed,
            self.total_rows,
            self.blank_rows,
            self.dropped_rows,
            self.coerced_values
        )
    }
}
