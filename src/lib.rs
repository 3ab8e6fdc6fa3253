//! Baseline Analytics Library
//!
//! A Rust library for turning vendor swing-tracking exports into clean,
//! chart-ready time series for athlete development reviews.
//!
//! This library provides tools for:
//! - Reading Blast Motion and HitTrax CSV exports, including noisy preambles
//! - Normalizing rows into typed records keyed by timestamp
//! - Collapsing swings into per-session averages
//! - Fitting least-squares trend lines over any metric
//! - Building comparison series, player rosters and presentation decks
//! - Persisting parsed datasets as JSON snapshots

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_ingest;
        pub mod presentation;
        pub mod roster;
        pub mod series;
        pub mod session_aggregator;
        pub mod tabular_reader;
        pub mod trend;
        pub mod vendor_csv_parser;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Dataset, FieldValue, ParsedFile, Record, SessionRecord, SourceType, TrendInput, TrendLine,
    TrendPoint,
};
pub use app::services::session_aggregator::aggregate_by_session;
pub use app::services::trend::fit_trend_line;
pub use app::services::vendor_csv_parser::{parse_blast, parse_hittrax};
pub use config::AnalyticsConfig;

/// Result type alias for baseline analytics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ingestion, aggregation and persistence
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8 text
    #[error("Could not decode '{file}' as text")]
    Decode {
        file: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Blast header row was not found in the scan window
    #[error("Could not find Blast data header row in '{file}' (scanned {scanned_rows} rows)")]
    HeaderNotFound { file: String, scanned_rows: usize },

    /// HitTrax export has no data rows
    #[error("HitTrax file '{file}' appears to be empty")]
    EmptyFile { file: String },

    /// CSV tokenizer error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// File rejected before parsing
    #[error("Unsupported file '{file}': {reason}")]
    UnsupportedFile { file: String, reason: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Player not present in the loaded dataset
    #[error("Player not found: {player}")]
    PlayerNotFound { player: String },

    /// Background parse task did not complete
    #[error("Parse task failed: {message}")]
    TaskFailed { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a text decoding error
    pub fn decode(file: impl Into<String>, source: std::str::Utf8Error) -> Self {
        Self::Decode {
            file: file.into(),
            source,
        }
    }

    /// Create a missing Blast header error
    pub fn header_not_found(file: impl Into<String>, scanned_rows: usize) -> Self {
        Self::HeaderNotFound {
            file: file.into(),
            scanned_rows,
        }
    }

    /// Create an empty HitTrax file error
    pub fn empty_file(file: impl Into<String>) -> Self {
        Self::EmptyFile { file: file.into() }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported file error
    pub fn unsupported_file(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFile {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a player not found error
    pub fn player_not_found(player: impl Into<String>) -> Self {
        Self::PlayerNotFound {
            player: player.into(),
        }
    }

    /// Create a task failure error
    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
