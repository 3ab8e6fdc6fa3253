//! Data models for athlete swing metrics
//!
//! This module contains the shared record shape produced by the vendor parsers and
//! consumed by session aggregation, trend fitting and the chart/presentation layers.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::constants::{DATE_STR_KEY, SWING_COUNT_KEY, TIMESTAMP_KEY};

// =============================================================================
// Source Type
// =============================================================================

/// Vendor export format a file was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Blast Motion bat-sensor export
    Blast,
    /// HitTrax ball-tracking export
    HitTrax,
}

impl SourceType {
    /// All supported sources in display order
    pub const ALL: [SourceType; 2] = [SourceType::Blast, SourceType::HitTrax];

    /// Stable lowercase identifier used in snapshots and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Blast => "blast",
            SourceType::HitTrax => "hittrax",
        }
    }

    /// Human-readable vendor label
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Blast => "Blast Motion",
            SourceType::HitTrax => "HitTrax",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blast" => Ok(SourceType::Blast),
            "hittrax" => Ok(SourceType::HitTrax),
            other => Err(Error::configuration(format!(
                "Unknown source type '{}' (expected 'blast' or 'hittrax')",
                other
            ))),
        }
    }
}

// =============================================================================
// Field Values and Records
// =============================================================================

/// A single cell value after type coercion
///
/// Serialized untagged so snapshots read as plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// One parsed row: an ordered field map plus the normalized timestamp and date label
///
/// Field order follows the source header. Inserting an existing name replaces the
/// value in place, so duplicate header columns keep their first position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Date as printed by the source; grouping key and chart label
    pub date_str: String,
}

impl Record {
    /// Create an empty record for the given instant
    pub fn new(timestamp: i64, date_str: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            timestamp,
            date_str: date_str.into(),
        }
    }

    /// Insert or replace a field value
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder-style variant of [`Record::insert`]
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Numeric value of a field, `None` when absent, null or text
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Text value of a field, `None` when absent or not text
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Calendar-date portion of `date_str` (text before the first space)
    ///
    /// Leading whitespace is ignored, so `" 2024-01-01"` keys as `"2024-01-01"`.
    pub fn date_key(&self) -> &str {
        let date = self.date_str.trim_start();
        date.split_once(' ').map_or(date, |(day, _)| day)
    }

    fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for (name, value) in self.fields() {
            // The flattened layout reserves these keys
            if name == TIMESTAMP_KEY || name == DATE_STR_KEY {
                continue;
            }
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(TIMESTAMP_KEY, &self.timestamp)?;
        map.serialize_entry(DATE_STR_KEY, &self.date_str)
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        self.serialize_entries(&mut map)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of record fields with timestamp and dateStr")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record, A::Error> {
                let mut record = Record::default();
                let mut timestamp = None;
                let mut date_str = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        TIMESTAMP_KEY => timestamp = Some(map.next_value::<i64>()?),
                        DATE_STR_KEY => date_str = Some(map.next_value::<String>()?),
                        _ => {
                            let value = map.next_value::<FieldValue>()?;
                            record.insert(key, value);
                        }
                    }
                }

                record.timestamp = timestamp.ok_or_else(|| de::Error::missing_field("timestamp"))?;
                record.date_str = date_str.ok_or_else(|| de::Error::missing_field("dateStr"))?;
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// One averaged record per calendar date, with the number of swings behind it
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub record: Record,
    pub swing_count: usize,
}

impl AsRef<Record> for SessionRecord {
    fn as_ref(&self) -> &Record {
        &self.record
    }
}

impl Serialize for SessionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len() + 3))?;
        self.record.serialize_entries(&mut map)?;
        map.serialize_entry(SWING_COUNT_KEY, &self.swing_count)?;
        map.end()
    }
}

// =============================================================================
// Parsed Files and Datasets
// =============================================================================

/// Result of parsing one vendor export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub player_name: String,
    pub source_type: SourceType,
    /// Records sorted ascending by timestamp
    pub records: Vec<Record>,
    pub original_filename: String,
}

impl ParsedFile {
    /// Timestamp range covered by the file, if it has any records
    pub fn time_span(&self) -> Option<(i64, i64)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.timestamp, last.timestamp))
    }
}

/// All successfully parsed files, split by source
///
/// This is the shape persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub blast: Vec<ParsedFile>,
    #[serde(default)]
    pub hittrax: Vec<ParsedFile>,
}

impl Dataset {
    /// Add a parsed file to the list for its source
    pub fn push(&mut self, file: ParsedFile) {
        match file.source_type {
            SourceType::Blast => self.blast.push(file),
            SourceType::HitTrax => self.hittrax.push(file),
        }
    }

    pub fn files(&self, source: SourceType) -> &[ParsedFile] {
        match source {
            SourceType::Blast => &self.blast,
            SourceType::HitTrax => &self.hittrax,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blast.is_empty() && self.hittrax.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.blast.len() + self.hittrax.len()
    }
}

impl FromIterator<ParsedFile> for Dataset {
    fn from_iter<I: IntoIterator<Item = ParsedFile>>(iter: I) -> Self {
        let mut dataset = Dataset::default();
        for file in iter {
            dataset.push(file);
        }
        dataset
    }
}

// =============================================================================
// Metric Catalog Entries
// =============================================================================

/// A charted metric: record field key plus display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDef {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub category: &'static str,
}

// =============================================================================
// Trend Lines
// =============================================================================

/// Input pair for trend fitting; `y` is `None` where the metric is missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendInput {
    pub x: f64,
    pub y: Option<f64>,
}

impl TrendInput {
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

/// Least-squares line evaluated at the smallest and largest x of its input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub p0: TrendPoint,
    pub p1: TrendPoint,
}

impl TrendLine {
    /// Change in y per unit of x
    pub fn slope(&self) -> f64 {
        (self.p1.y - self.p0.y) / (self.p1.x - self.p0.x)
    }

    /// Slope rescaled from per-millisecond to per-day, for timestamp-based lines
    pub fn slope_per_day(&self) -> f64 {
        self.slope() * crate::constants::MILLIS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record::new(1_704_067_200_000, "2024-01-01")
            .with_field("Equipment", FieldValue::Text("Bat X".to_string()))
            .with_field("Bat Speed mph", FieldValue::Number(62.5))
            .with_field("Power kW", FieldValue::Null)
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = sample_record();
        record.insert("Equipment", FieldValue::Text("Bat Y".to_string()));

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["Equipment", "Bat Speed mph", "Power kW"]);
        assert_eq!(record.text("Equipment"), Some("Bat Y"));
    }

    #[test]
    fn test_typed_accessors() {
        let record = sample_record();

        assert_eq!(record.number("Bat Speed mph"), Some(62.5));
        assert_eq!(record.number("Equipment"), None);
        assert_eq!(record.number("Power kW"), None);
        assert!(record.get("Power kW").unwrap().is_null());
        assert_eq!(record.get("Missing"), None);
    }

    #[test]
    fn test_date_key_strips_time() {
        let record = Record::new(0, "2024-02-01 10:15:00");
        assert_eq!(record.date_key(), "2024-02-01");

        let record = Record::new(0, "2/1/2024");
        assert_eq!(record.date_key(), "2/1/2024");
        let record = Record::new(0, " 2024-01-01");
        assert_eq!(record.date_key(), "2024-01-01");
    }

    #[test]
    fn test_record_json_layout() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(json["Equipment"], "Bat X");
        assert_eq!(json["Bat Speed mph"], 62.5);
        assert!(json["Power kW"].is_null());
        assert_eq!(json["timestamp"], 1_704_067_200_000_i64);
        assert_eq!(json["dateStr"], "2024-01-01");
    }

    #[test]
    fn test_record_json_restores_fields() {
        let original = sample_record();
        let json = serde_json::to_string(&original).unwrap();
        let restored: Record = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_record_json_requires_timestamp() {
        let result: std::result::Result<Record, _> =
            serde_json::from_str(r#"{"dateStr": "2024-01-01", "AvgV": 70}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_record_serializes_swing_count() {
        let session = SessionRecord {
            record: sample_record(),
            swing_count: 4,
        };
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["swingCount"], 4);
        assert_eq!(json["dateStr"], "2024-01-01");
    }

    #[test]
    fn test_parsed_file_uses_camel_case() {
        let file = ParsedFile {
            player_name: "Jane Doe".to_string(),
            source_type: SourceType::HitTrax,
            records: vec![sample_record()],
            original_filename: "JaneDoedata.csv".to_string(),
        };
        let json = serde_json::to_value(&file).unwrap();

        assert_eq!(json["playerName"], "Jane Doe");
        assert_eq!(json["sourceType"], "hittrax");
        assert_eq!(json["originalFilename"], "JaneDoedata.csv");
        assert_eq!(json["records"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_source_type_from_str() {
        assert_eq!("Blast".parse::<SourceType>().unwrap(), SourceType::Blast);
        assert_eq!(" hittrax ".parse::<SourceType>().unwrap(), SourceType::HitTrax);
        assert!("rapsodo".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_dataset_routes_by_source() {
        let dataset: Dataset = vec![
            ParsedFile {
                player_name: "A".to_string(),
                source_type: SourceType::Blast,
                records: vec![],
                original_filename: "a.csv".to_string(),
            },
            ParsedFile {
                player_name: "B".to_string(),
                source_type: SourceType::HitTrax,
                records: vec![],
                original_filename: "b.csv".to_string(),
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(dataset.blast.len(), 1);
        assert_eq!(dataset.hittrax.len(), 1);
        assert_eq!(dataset.file_count(), 2);
        assert_eq!(dataset.files(SourceType::HitTrax)[0].player_name, "B");
    }

    #[test]
    fn test_trend_slope_per_day() {
        let line = TrendLine {
            p0: TrendPoint { x: 0.0, y: 60.0 },
            p1: TrendPoint {
                x: 2.0 * crate::constants::MILLIS_PER_DAY,
                y: 62.0,
            },
        };
        assert!((line.slope_per_day() - 1.0).abs() < 1e-9);
    }
}
