//! Individual row parsing for vendor CSV files
//!
//! Converts one grid row into a [`Record`] using a [`ColumnMapping`], attaching the
//! timestamp and date label, and reports coercions through [`ParseStats`].

use tracing::debug;

use super::column_mapping::{ColumnMapping, FieldKind};
use super::field_parsers::{NumericCell, parse_numeric, parse_timestamp};
use super::stats::{ParseStats, WarningKind};
use crate::app::models::{FieldValue, Record};
use crate::constants::{DATE_COLUMN, TIME_COLUMN};

/// Whether text cells are stored verbatim or trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
    Verbatim,
    Trimmed,
}

/// True when the row has no usable first cell
pub fn is_skippable_row(row: &[String]) -> bool {
    row.first().is_none_or(|cell| cell.trim().is_empty())
}

/// Build the field map for one row; timestamp and date label are left unset
///
/// Cells missing from a short row read as empty.
pub fn parse_fields(
    row: &[String],
    row_number: usize,
    mapping: &ColumnMapping,
    mode: CellMode,
    stats: &mut ParseStats,
) -> Record {
    let mut record = Record::default();

    for (index, field) in mapping.fields.iter().enumerate() {
        let raw = row.get(index).map_or("", String::as_str);
        let cell = match mode {
            CellMode::Verbatim => raw,
            CellMode::Trimmed => raw.trim(),
        };

        let value = match field.kind {
            FieldKind::Text => FieldValue::Text(cell.to_string()),
            FieldKind::Numeric => match parse_numeric(cell) {
                NumericCell::Value(value) => FieldValue::Number(value),
                NumericCell::Blank => FieldValue::Null,
                NumericCell::Unparseable => {
                    debug!(
                        "Row {}: '{}' = '{}' is not numeric, storing null",
                        row_number, field.name, cell
                    );
                    stats.add_warning(
                        row_number,
                        WarningKind::CoercedNumeric {
                            field: field.name.clone(),
                            value: cell.to_string(),
                        },
                    );
                    FieldValue::Null
                }
            },
        };

        record.insert(field.name.clone(), value);
    }

    record
}

/// Attach timestamp and date label from the Date (and optional Time) fields
///
/// Returns `None`, after recording a warning, when the date is absent or unparseable.
pub fn attach_timestamp(
    mut record: Record,
    row_number: usize,
    include_time: bool,
    stats: &mut ParseStats,
) -> Option<Record> {
    let date = match record.text(DATE_COLUMN) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => {
            stats.add_warning(row_number, WarningKind::MissingDate);
            return None;
        }
    };

    let stamp_source = match record.text(TIME_COLUMN) {
        Some(time) if include_time && !time.is_empty() => format!("{} {}", date, time),
        _ => date.clone(),
    };

    match parse_timestamp(&stamp_source) {
        Some(timestamp) => {
            record.timestamp = timestamp;
            record.date_str = date;
            Some(record)
        }
        None => {
            stats.add_warning(
                row_number,
                WarningKind::UnparseableDate {
                    value: stamp_source,
                },
            );
            None
        }
    }
}

/// Stable sort by timestamp; rows with equal timestamps keep file order
pub fn sort_chronologically(records: &mut [Record]) {
    records.sort_by_key(|record| record.timestamp);
}
