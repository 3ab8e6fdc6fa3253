//! Blast Motion export parser
//!
//! Blast exports open with device metadata rows before the real table. The
//! header row is found by its first two cells, `Date` and `Equipment`, within a
//! bounded scan window; everything above it is discarded.

use std::sync::Arc;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::player_name::{PlayerNameStrategy, default_strategy};
use super::record_parser::{
    CellMode, attach_timestamp, is_skippable_row, parse_fields, sort_chronologically,
};
use super::stats::{ParseOutcome, ParseStats};
use crate::app::models::{ParsedFile, SourceType};
use crate::app::services::tabular_reader::{RawGrid, read_grid};
use crate::config::ParserConfig;
use crate::constants::BLAST_HEADER_MARKERS;
use crate::{Error, Result};

/// Parser for Blast Motion swing exports
#[derive(Debug, Clone)]
pub struct BlastParser {
    config: ParserConfig,
    naming: Arc<dyn PlayerNameStrategy>,
}

impl Default for BlastParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl BlastParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            naming: default_strategy(SourceType::Blast),
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
        let header_index = self.find_header(grid, filename)?;
        debug!(
            "Blast header found at row {} of {}",
            header_index + 1,
            filename
        );

        let header = grid.row(header_index).unwrap_or_default();
        let mapping = ColumnMapping::blast(header);
        let (total_cols, text_cols, numeric_cols) = mapping.stats();
        debug!(
            "Column mapping: {} total, {} text, {} numeric",
            total_cols, text_cols, numeric_cols
        );

        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for (index, row) in grid.rows().iter().enumerate().skip(header_index + 1) {
            stats.total_rows += 1;

            if is_skippable_row(row) {
                stats.blank_rows += 1;
                continue;
            }

            let row_number = index + 1;
            let record = parse_fields(row, row_number, &mapping, CellMode::Verbatim, &mut stats);
            if let Some(record) = attach_timestamp(record, row_number, false, &mut stats) {
                records.push(record);
            }
        }

        sort_chronologically(&mut records);
        stats.records_parsed = records.len();

        let player_name = self.naming.player_name(filename);
        info!(
            "Parsed Blast file {} for {}: {}",
            filename,
            player_name,
            stats.summary()
        );

        Ok(ParseOutcome {
            file: ParsedFile {
                player_name,
                source_type: SourceType::Blast,
                records,
                original_filename: filename.to_string(),
            },
            stats,
        })
    }

    /// Index of the first row starting with the exact `Date`, `Equipment` cells
    fn find_header(&self, grid: &RawGrid, filename: &str) -> Result<usize> {
        let window = self.config.header_scan_rows.min(grid.len());

        grid.rows()[..window]
            .iter()
            .position(|row| {
                row.len() >= BLAST_HEADER_MARKERS.len()
                    && row
                        .iter()
                        .zip(BLAST_HEADER_MARKERS)
                        .all(|(cell, marker)| cell == marker)
            })
            .ok_or_else(|| Error::header_not_found(filename, window))
    }
}
