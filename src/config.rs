//! Configuration management and validation.
//!
//! Provides configuration structures for vendor parsing, batch ingestion
//! and snapshot storage. Every section has defaults, so a configuration
//! file only needs to name the values it overrides.

use crate::constants::{APP_DIR_NAME, DEFAULT_HEADER_SCAN_ROWS, STORAGE_KEY};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by the vendor CSV parsers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Rows searched for the Blast `Date,Equipment` header
    pub header_scan_rows: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
        }
    }
}

/// Batch ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Files parsed concurrently
    pub max_concurrent_files: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: num_cpus::get(),
        }
    }
}

/// Snapshot storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Snapshot file location; `None` uses the user data directory
    pub snapshot_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the snapshot path, falling back to `<data dir>/baseline-analytics/`
    pub fn resolve_snapshot_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.snapshot_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::configuration("Could not determine user data directory"))?;

        Ok(data_dir
            .join(APP_DIR_NAME)
            .join(format!("{}.json", STORAGE_KEY)))
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub parser: ParserConfig,
    pub ingest: IngestConfig,
    pub storage: StorageConfig,
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file and validate it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: AnalyticsConfig = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(
                format!("Invalid config file {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.parser.header_scan_rows == 0 {
            return Err(Error::configuration(
                "parser.header_scan_rows must be at least 1",
            ));
        }
        if self.ingest.max_concurrent_files == 0 {
            return Err(Error::configuration(
                "ingest.max_concurrent_files must be at least 1",
            ));
        }
        Ok(())
    }

    /// Override the Blast header scan window
    pub fn with_header_scan_rows(mut self, rows: usize) -> Self {
        self.parser.header_scan_rows = rows;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.ingest.max_concurrent_files = max_files;
        self
    }

    /// Store snapshots at an explicit path
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.snapshot_path = Some(path.into());
        self
    }
}
