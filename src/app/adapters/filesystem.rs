//! Filesystem adapter
//!
//! Snapshot persistence for parsed datasets, and discovery of export files on
//! disk for batch ingestion.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::app::models::{Dataset, SourceType};
use crate::app::services::batch_ingest::IngestRequest;
use crate::config::StorageConfig;
use crate::{Error, Result};

/// JSON snapshot of the last ingested dataset
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or the default under the user data directory
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(config.resolve_snapshot_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the dataset, replacing any previous snapshot
    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create snapshot directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let json = serde_json::to_string(dataset)
            .map_err(|e| Error::serialization("Failed to serialize dataset", e))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| {
            Error::io(format!("Failed to write {}", temp_path.display()), e)
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            Error::io(format!("Failed to replace {}", self.path.display()), e)
        })?;

        info!(
            "Saved snapshot with {} files to {}",
            dataset.file_count(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the saved dataset
    ///
    /// Returns `None` when there is no snapshot or it holds no files. A snapshot
    /// that cannot be decoded is deleted and treated as absent.
    pub fn load(&self) -> Result<Option<Dataset>> {
        if !self.path.exists() {
            debug!("No snapshot at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::io(format!("Failed to read {}", self.path.display()), e))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Dataset>(&content) {
            Ok(dataset) if dataset.is_empty() => Ok(None),
            Ok(dataset) => {
                debug!(
                    "Loaded snapshot with {} files from {}",
                    dataset.file_count(),
                    self.path.display()
                );
                Ok(Some(dataset))
            }
            Err(e) => {
                warn!(
                    "Discarding unreadable snapshot {}: {}",
                    self.path.display(),
                    e
                );
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Delete the snapshot; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed snapshot {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io(
                format!("Failed to remove {}", self.path.display()),
                e,
            )),
        }
    }
}

/// Expand files and directories into a list of files
///
/// Files are taken as given. Directories are walked recursively for `*.csv`
/// files, returned in path order.
pub fn collect_csv_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let metadata = fs::metadata(path)
            .map_err(|e| Error::io(format!("Cannot access {}", path.display()), e))?;

        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            match entry {
                Ok(entry) => {
                    let entry_path = entry.path();
                    if entry_path.is_file()
                        && entry_path.extension().is_some_and(|ext| ext == "csv")
                    {
                        found.push(entry_path.to_path_buf());
                    }
                }
                Err(e) => {
                    warn!("Error walking directory {}: {}", path.display(), e);
                }
            }
        }

        found.sort();
        debug!("Found {} CSV files under {}", found.len(), path.display());
        files.extend(found);
    }

    Ok(files)
}

/// Read a file from disk into an ingest request
pub fn read_request(path: &Path, source: SourceType) -> Result<IngestRequest> {
    let bytes =
        fs::read(path).map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(IngestRequest::new(bytes, filename, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FieldValue, ParsedFile, Record};
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        let record = Record::new(1_704_067_200_000, "2024-01-01")
            .with_field("Equipment", FieldValue::Text("Bat X".to_string()))
            .with_field("Bat Speed mph", FieldValue::Number(62.5))
            .with_field("Power kW", FieldValue::Null);

        vec![ParsedFile {
            player_name: "Jane Doe".to_string(),
            source_type: SourceType::Blast,
            records: vec![record],
            original_filename: "Metrics - Jane Doe - 2024.csv".to_string(),
        }]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("snapshot.json"));

        store.save(&dataset()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, dataset());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_snapshot_layout() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        store.save(&dataset()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let record = &raw["blast"][0]["records"][0];

        assert_eq!(raw["blast"][0]["playerName"], "Jane Doe");
        assert_eq!(raw["blast"][0]["sourceType"], "blast");
        assert_eq!(record["Bat Speed mph"], 62.5);
        assert!(record["Power kW"].is_null());
        assert_eq!(record["timestamp"], 1_704_067_200_000i64);
        assert_eq!(record["dateStr"], "2024-01-01");
        assert_eq!(raw["hittrax"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_missing_and_empty_snapshots() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        assert!(store.load().unwrap().is_none());

        fs::write(store.path(), "").unwrap();
        assert!(store.load().unwrap().is_none());

        store.save(&Dataset::default()).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));
        fs::write(store.path(), "{\"blast\": [oops").unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));

        assert!(!store.clear().unwrap());
        store.save(&dataset()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_collect_csv_files() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("week2");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("b.csv"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(nested.join("a.csv"), "x").unwrap();
        let explicit = dir.path().join("notes.txt");

        let files = collect_csv_files(&[dir.path().to_path_buf(), explicit.clone()]).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("b.csv"), nested.join("a.csv"), explicit]
        );
    }

    #[test]
    fn test_collect_missing_path() {
        let dir = TempDir::new().unwrap();
        let result = collect_csv_files(&[dir.path().join("missing")]);
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_read_request() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("JohnSmithdata.csv");
        fs::write(&path, "Date,AvgV\n").unwrap();

        let request = read_request(&path, SourceType::HitTrax).unwrap();

        assert_eq!(request.filename, "JohnSmithdata.csv");
        assert_eq!(request.bytes, b"Date,AvgV\n");
        assert_eq!(request.source, SourceType::HitTrax);
    }
}
