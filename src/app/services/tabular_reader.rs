//! Raw CSV grid reading
//!
//! Turns file bytes into a rectangular-ish grid of string cells. Rows keep
//! whatever width the file gives them, and blank physical lines survive as
//! empty rows so that row positions match what a spreadsheet would show.

use crate::{Error, Result};

const UTF8_BOM: char = '\u{feff}';

/// Rows of string cells exactly as the file lays them out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell text, or the empty string when the row is shorter than `column`
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read raw bytes into a [`RawGrid`]
///
/// Fails only when the bytes are not UTF-8 text. A leading byte-order mark is
/// dropped. Blank lines before a record come back as empty rows; trailing
/// blank lines are not kept.
pub fn read_grid(bytes: &[u8], file: &str) -> Result<RawGrid> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::decode(file, e))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    // The tokenizer skips empty lines, so they are restored from the physical lines
    let lines: Vec<&str> = text.split('\n').collect();
    let mut line = 0usize;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::with_capacity(lines.len());
    for result in reader.records() {
        let record = result
            .map_err(|e| Error::csv_parsing(file, "Failed to read CSV record", Some(e)))?;

        while lines.get(line).is_some_and(|l| is_blank(l)) {
            rows.push(Vec::new());
            line += 1;
        }

        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        line += 1 + cells.iter().map(|cell| cell.matches('\n').count()).sum::<usize>();
        rows.push(cells);
    }

    Ok(RawGrid::new(rows))
}

fn is_blank(line: &str) -> bool {
    line.trim_end_matches('\r').is_empty()
}
