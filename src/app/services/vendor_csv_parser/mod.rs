//! Vendor CSV parsers for Blast Motion and HitTrax exports
//!
//! Both vendors export one swing (or one at-bat summary) per row, but the files
//! differ in layout: Blast prefixes the table with device metadata rows and puts
//! units in parentheses inside header cells, while HitTrax starts with a plain
//! header row. Each parser turns a file into a [`ParsedFile`] whose records are
//! sorted by timestamp, plus [`ParseStats`] describing what was skipped or coerced.
//!
//! ## Architecture
//!
//! - [`blast`] / [`hittrax`] - Format-specific orchestration
//! - [`column_mapping`] - Header cleanup and per-column type tags
//! - [`record_parser`] - Row to record conversion
//! - [`field_parsers`] - Numeric coercion and date parsing
//! - [`player_name`] - Filename-based player identity rules
//! - [`stats`] - Parse diagnostics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use baseline_analytics::app::services::vendor_csv_parser::parse_hittrax;
//!
//! let csv = "Date,Time,AvgV\n2024-02-01,10:00,70\n";
//! let file = parse_hittrax(csv.as_bytes(), "JohnSmithdata.csv")?;
//! assert_eq!(file.player_name, "John Smith");
//! assert_eq!(file.records[0].number("AvgV"), Some(70.0));
//! # Ok::<(), baseline_analytics::Error>(())
//! ```

pub mod blast;
pub mod column_mapping;
pub mod field_parsers;
pub mod hittrax;
pub mod player_name;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use blast::BlastParser;
pub use column_mapping::{ColumnMapping, FieldKind, FieldSpec};
pub use hittrax::HitTraxParser;
pub use player_name::{
    BlastFilenameRule, HitTraxFilenameRule, PlayerNameStrategy, default_strategy,
};
pub use stats::{ParseOutcome, ParseStats, ParseWarning, WarningKind};

use crate::Result;
use crate::app::models::{ParsedFile, SourceType};
use crate::config::ParserConfig;

/// Parse a Blast Motion export with default settings
pub fn parse_blast(bytes: &[u8], filename: &str) -> Result<ParsedFile> {
    BlastParser::default()
        .parse(bytes, filename)
        .map(|outcome| outcome.file)
}

/// Parse a HitTrax export with default settings
pub fn parse_hittrax(bytes: &[u8], filename: &str) -> Result<ParsedFile> {
    HitTraxParser::default()
        .parse(bytes, filename)
        .map(|outcome| outcome.file)
}

/// Parse a file with the parser for `source`, keeping diagnostics
///
/// `config` only affects Blast's header scan.
pub fn parse_file(
    source: SourceType,
    bytes: &[u8],
    filename: &str,
    config: &ParserConfig,
) -> Result<ParseOutcome> {
    match source {
        SourceType::Blast => BlastParser::new(config.clone()).parse(bytes, filename),
        SourceType::HitTrax => HitTraxParser::new().parse(bytes, filename),
    }
}
