//! Concurrent batch ingestion of vendor exports
//!
//! Each file is parsed on a blocking task with bounded concurrency. A failure
//! is recorded against its own file and never stops the rest of the batch.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use tokio::task;
use tracing::{debug, info, warn};

use crate::app::models::{Dataset, ParsedFile, SourceType};
use crate::app::services::vendor_csv_parser::{ParseStats, parse_file};
use crate::config::{AnalyticsConfig, ParserConfig};
use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};

/// One file submitted for parsing
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub source: SourceType,
}

impl IngestRequest {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>, source: SourceType) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            source,
        }
    }
}

/// Per-file processing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Success,
    Error(String),
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Success => write!(f, "success"),
            FileStatus::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// Outcome for one submitted file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub filename: String,
    pub source: SourceType,
    pub status: FileStatus,
    pub file: Option<ParsedFile>,
    pub stats: Option<ParseStats>,
}

impl FileReport {
    pub fn pending(filename: impl Into<String>, source: SourceType) -> Self {
        Self {
            filename: filename.into(),
            source,
            status: FileStatus::Pending,
            file: None,
            stats: None,
        }
    }

    fn failed(filename: String, source: SourceType, error: &Error) -> Self {
        Self {
            status: FileStatus::Error(error.to_string()),
            ..Self::pending(filename, source)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FileStatus::Success
    }

    /// Player name for successful files
    pub fn player_name(&self) -> Option<&str> {
        self.file.as_ref().map(|file| file.player_name.as_str())
    }
}

/// Reports in submission order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// All requests marked pending, before any parsing
    pub fn pending(requests: &[IngestRequest]) -> Self {
        Self {
            files: requests
                .iter()
                .map(|request| FileReport::pending(request.filename.clone(), request.source))
                .collect(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|report| report.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|report| matches!(report.status, FileStatus::Error(_)))
            .count()
    }

    /// Collect successfully parsed files, keeping submission order per source
    pub fn into_dataset(self) -> Dataset {
        self.files
            .into_iter()
            .filter_map(|report| report.file)
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} files: {} succeeded, {} failed",
            self.files.len(),
            self.succeeded(),
            self.failed()
        )
    }
}

/// Parse a batch of files concurrently
///
/// Reports come back in the order the requests were given, whatever order the
/// parses finish in.
pub async fn ingest_batch(requests: Vec<IngestRequest>, config: &AnalyticsConfig) -> BatchReport {
    let limit = config.ingest.max_concurrent_files.max(1);
    info!(
        "Ingesting {} files with up to {} concurrent parses",
        requests.len(),
        limit
    );

    let mut indexed: Vec<(usize, FileReport)> = stream::iter(requests.into_iter().enumerate())
        .map(|(index, request)| {
            let parser_config = config.parser.clone();
            async move {
                let filename = request.filename.clone();
                let source = request.source;

                let report = match task::spawn_blocking(move || {
                    ingest_one(&request, &parser_config)
                })
                .await
                {
                    Ok(report) => report,
                    Err(e) => {
                        let error = Error::task_failed(format!("Parse task for {}: {}", filename, e));
                        FileReport::failed(filename, source, &error)
                    }
                };

                (index, report)
            }
        })
        .buffer_unordered(limit)
        .collect::<Vec<_>>()
        .await;

    indexed.sort_by_key(|(index, _)| *index);
    let report = BatchReport {
        files: indexed.into_iter().map(|(_, report)| report).collect(),
    };

    info!("Batch complete: {}", report.summary());
    report
}

/// Parse one request into its report
fn ingest_one(request: &IngestRequest, config: &ParserConfig) -> FileReport {
    match parse_request(request, config) {
        Ok((file, stats)) => {
            debug!("Parsed {}: {}", request.filename, stats.summary());
            FileReport {
                filename: request.filename.clone(),
                source: request.source,
                status: FileStatus::Success,
                file: Some(file),
                stats: Some(stats),
            }
        }
        Err(e) => {
            warn!("Failed to parse {}: {}", request.filename, e);
            FileReport::failed(request.filename.clone(), request.source, &e)
        }
    }
}

fn parse_request(request: &IngestRequest, config: &ParserConfig) -> Result<(ParsedFile, ParseStats)> {
    if !request.filename.ends_with(CSV_EXTENSION) {
        return Err(Error::unsupported_file(
            &request.filename,
            "only .csv exports are accepted",
        ));
    }

    let outcome = parse_file(request.source, &request.bytes, &request.filename, config)?;
    Ok((outcome.file, outcome.stats))
}
