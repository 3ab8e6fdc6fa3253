//! HitTrax export parser
//!
//! HitTrax files have no preamble: row one is the header. `Date`, `Time` and
//! `Tag` stay text, every other column is numeric, and the record timestamp
//! combines `Date` with `Time` when a time is present.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::player_name::{PlayerNameStrategy, default_strategy};
use super::record_parser::{
    CellMode, attach_timestamp, is_skippable_row, parse_fields, sort_chronologically,
};
use super::stats::{ParseOutcome, ParseStats};
use crate::app::models::{ParsedFile, SourceType};
use crate::app::services::tabular_reader::{RawGrid, read_grid};
use crate::constants::DATE_COLUMN;
use crate::{Error, Result};

/// Parser for HitTrax batted-ball exports
///
/// The header is always row one, so no scan window applies.
#[derive(Debug, Clone)]
pub struct HitTraxParser {
    naming: Arc<dyn PlayerNameStrategy>,
}

impl Default for HitTraxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HitTraxParser {
    pub fn new() -> Self {
        Self {
            naming: default_strategy(SourceType::HitTrax),
        }
    }

    /// Replace the filename rule used for player identity
    pub fn with_name_strategy(mut self, naming: Arc<dyn PlayerNameStrategy>) -> Self {
        self.naming = naming;
        self
    }

    /// Parse raw export bytes
    pub fn parse(&self, bytes: &[u8], filename: &str) -> Result<ParseOutcome> {
        let grid = read_grid(bytes, filename)?;
        self.parse_grid(&grid, filename)
    }

    /// Parse an already tokenized grid
    pub fn parse_grid(&self, grid: &RawGrid, filename: &str) -> Result<ParseOutcome> {
        if grid.len() < 2 {
            return Err(Error::empty_file(filename));
        }

        let mapping = ColumnMapping::hittrax(grid.row(0).unwrap_or_default());
        if !mapping.has_column(DATE_COLUMN) {
            warn!("{} has no Date column; every row will be dropped", filename);
        }
        let (total_cols, text_cols, numeric_cols) = mapping.stats();
        debug!(
            "Column mapping: {} total, {} text, {} numeric",
            total_cols, text_cols, numeric_cols
        );

        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for (index, row) in grid.rows().iter().enumerate().skip(1) {
            stats.total_rows += 1;

            if is_skippable_row(row) {
                stats.blank_rows += 1;
                continue;
            }

            let row_number = index + 1;
            let record = parse_fields(row, row_number, &mapping, CellMode::Trimmed, &mut stats);
            if let Some(record) = attach_timestamp(record, row_number, true, &mut stats) {
                records.push(record);
            }
        }

        sort_chronologically(&mut records);
        stats.records_parsed = records.len();

        let player_name = self.naming.player_name(filename);
        info!(
            "Parsed HitTrax file {} for {}: {}",
            filename,
            player_name,
            stats.summary()
        );

        Ok(ParseOutcome {
            file: ParsedFile {
                player_name,
                source_type: SourceType::HitTrax,
                records,
                original_filename: filename.to_string(),
            },
            stats,
        })
    }
}
