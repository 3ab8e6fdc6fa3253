//! Application constants for baseline analytics
//!
//! This module contains default values, reserved record keys, field-name
//! conventions of the vendor exports and the metric catalogs used for charts.

use crate::app::models::{MetricDef, SourceType};

// =============================================================================
// Parsing Defaults
// =============================================================================

/// Rows scanned for the Blast header before giving up
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 15;

/// Blast header cells that identify the real header row
pub const BLAST_HEADER_MARKERS: [&str; 2] = ["Date", "Equipment"];

/// Leading Blast columns kept as text (Date, Equipment, Handedness, Swing Details)
pub const BLAST_TEXT_COLUMN_COUNT: usize = 4;

/// HitTrax columns kept as text; every other column is numeric
pub const HITTRAX_TEXT_COLUMNS: &[&str] = &["Date", "Time", "Tag"];

/// Column holding the row date in both formats
pub const DATE_COLUMN: &str = "Date";

/// HitTrax column holding the time of day
pub const TIME_COLUMN: &str = "Time";

/// Required file extension for vendor exports
pub const CSV_EXTENSION: &str = ".csv";

// =============================================================================
// Record Keys
// =============================================================================

/// Flattened key for the record timestamp
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Flattened key for the record date label
pub const DATE_STR_KEY: &str = "dateStr";

/// Flattened key for the number of swings behind a session record
pub const SWING_COUNT_KEY: &str = "swingCount";

/// Fields copied verbatim from the first swing of a session instead of averaged
pub const IDENTITY_FIELDS: &[&str] = &[
    "Date",
    "Equipment",
    "Handedness",
    "Swing Details",
    "Time",
    "Tag",
];

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

// =============================================================================
// Ingestion and Storage
// =============================================================================

/// Snapshot file stem
pub const STORAGE_KEY: &str = "baseline-player-data";

/// Application directory under the user data directory
pub const APP_DIR_NAME: &str = "baseline-analytics";

/// Players shown side by side in comparison charts
pub const MAX_COMPARISON_PLAYERS: usize = 3;

// =============================================================================
// Metric Catalogs
// =============================================================================

pub const BLAST_METRICS: &[MetricDef] = &[
    MetricDef {
        key: "Bat Speed mph",
        label: "Bat Speed",
        unit: "mph",
        category: "Power",
    },
    MetricDef {
        key: "Power kW",
        label: "Power",
        unit: "kW",
        category: "Power",
    },
    MetricDef {
        key: "Peak Hand Speed mph",
        label: "Peak Hand Speed",
        unit: "mph",
        category: "Power",
    },
    MetricDef {
        key: "Rotational Acceleration g",
        label: "Rotational Acceleration",
        unit: "g",
        category: "Power",
    },
    MetricDef {
        key: "Attack Angle deg",
        label: "Attack Angle",
        unit: "deg",
        category: "Mechanics",
    },
    MetricDef {
        key: "Plane Score",
        label: "Plane Score",
        unit: "",
        category: "Scores",
    },
    MetricDef {
        key: "Connection Score",
        label: "Connection Score",
        unit: "",
        category: "Scores",
    },
    MetricDef {
        key: "Rotation Score",
        label: "Rotation Score",
        unit: "",
        category: "Scores",
    },
    MetricDef {
        key: "On Plane Efficiency %",
        label: "On Plane Efficiency",
        unit: "%",
        category: "Mechanics",
    },
    MetricDef {
        key: "Early Connection deg",
        label: "Early Connection",
        unit: "deg",
        category: "Connection",
    },
    MetricDef {
        key: "Connection at Impact deg",
        label: "Connection at Impact",
        unit: "deg",
        category: "Connection",
    },
    MetricDef {
        key: "Vertical Bat Angle deg",
        label: "Vertical Bat Angle",
        unit: "deg",
        category: "Mechanics",
    },
    MetricDef {
        key: "Time to Contact sec",
        label: "Time to Contact",
        unit: "sec",
        category: "Timing",
    },
    MetricDef {
        key: "Exit Velocity mph",
        label: "Exit Velocity (Blast)",
        unit: "mph",
        category: "Results",
    },
    MetricDef {
        key: "Launch Angle deg",
        label: "Launch Angle (Blast)",
        unit: "deg",
        category: "Results",
    },
    MetricDef {
        key: "Estimated Distance feet",
        label: "Estimated Distance",
        unit: "ft",
        category: "Results",
    },
];

pub const HITTRAX_METRICS: &[MetricDef] = &[
    MetricDef {
        key: "AvgV",
        label: "Avg Exit Velocity",
        unit: "mph",
        category: "Velocity",
    },
    MetricDef {
        key: "MaxV",
        label: "Max Exit Velocity",
        unit: "mph",
        category: "Velocity",
    },
    MetricDef {
        key: "Dist",
        label: "Distance",
        unit: "ft",
        category: "Results",
    },
    MetricDef {
        key: "AVG",
        label: "Batting Average",
        unit: "",
        category: "Stats",
    },
    MetricDef {
        key: "SLG",
        label: "Slugging",
        unit: "",
        category: "Stats",
    },
    MetricDef {
        key: "AB",
        label: "At Bats",
        unit: "",
        category: "Counting",
    },
    MetricDef {
        key: "H",
        label: "Hits",
        unit: "",
        category: "Counting",
    },
    MetricDef {
        key: "EBH",
        label: "Extra Base Hits",
        unit: "",
        category: "Counting",
    },
    MetricDef {
        key: "HR",
        label: "Home Runs",
        unit: "",
        category: "Counting",
    },
    MetricDef {
        key: "HHA",
        label: "Hard Hit Average",
        unit: "",
        category: "Stats",
    },
    MetricDef {
        key: "LPH",
        label: "Line Drive Pull %",
        unit: "",
        category: "Batted Ball",
    },
    MetricDef {
        key: "Points",
        label: "Points",
        unit: "",
        category: "Results",
    },
    MetricDef {
        key: "LD %",
        label: "Line Drive %",
        unit: "%",
        category: "Batted Ball",
    },
    MetricDef {
        key: "FB %",
        label: "Fly Ball %",
        unit: "%",
        category: "Batted Ball",
    },
    MetricDef {
        key: "GB %",
        label: "Ground Ball %",
        unit: "%",
        category: "Batted Ball",
    },
];

/// Metric catalog for a source
pub fn metric_catalog(source: SourceType) -> &'static [MetricDef] {
    match source {
        SourceType::Blast => BLAST_METRICS,
        SourceType::HitTrax => HITTRAX_METRICS,
    }
}

/// Look up a metric by record key across both catalogs
pub fn find_metric(key: &str) -> Option<(SourceType, &'static MetricDef)> {
    SourceType::ALL.into_iter().find_map(|source| {
        metric_catalog(source)
            .iter()
            .find(|metric| metric.key == key)
            .map(|metric| (source, metric))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_are_unique_across_sources() {
        let keys: Vec<&str> = BLAST_METRICS
            .iter()
            .chain(HITTRAX_METRICS)
            .map(|metric| metric.key)
            .collect();
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn test_find_metric() {
        let (source, metric) = find_metric("AvgV").unwrap();
        assert_eq!(source, SourceType::HitTrax);
        assert_eq!(metric.label, "Avg Exit Velocity");

        let (source, metric) = find_metric("Bat Speed mph").unwrap();
        assert_eq!(source, SourceType::Blast);
        assert_eq!(metric.unit, "mph");

        assert!(find_metric("Spin Rate").is_none());
    }
}
