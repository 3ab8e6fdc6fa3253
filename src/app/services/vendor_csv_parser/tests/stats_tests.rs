//! Tests for parsing statistics functionality

use super::super::stats::{ParseStats, ParseWarning, WarningKind};

#[test]
fn test_parse_stats_empty() {
    let stats = ParseStats::new();

    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.records_parsed, 0);
    assert!(!stats.has_warnings());
    assert_eq!(stats.success_rate(), 100.0);
}

#[test]
fn test_success_rate_excludes_blank_rows() {
    let stats = ParseStats {
        total_rows: 12,
        records_parsed: 8,
        blank_rows: 2,
        dropped_rows: 2,
        ..Default::default()
    };

    assert_eq!(stats.success_rate(), 80.0);
}

#[test]
fn test_add_warning_updates_counters() {
    let mut stats = ParseStats::new();

    stats.add_warning(3, WarningKind::MissingDate);
    stats.add_warning(
        4,
        WarningKind::UnparseableDate {
            value: "not a date".to_string(),
        },
    );
    stats.add_warning(
        5,
        WarningKind::CoercedNumeric {
            field: "AvgV".to_string(),
            value: "n/a".to_string(),
        },
    );

    assert_eq!(stats.dropped_rows, 2);
    assert_eq!(stats.coerced_values, 1);
    assert_eq!(stats.warnings.len(), 3);
    assert_eq!(stats.warnings[2].row, 5);
    assert!(stats.has_warnings());
}

#[test]
fn test_warning_display() {
    let warning = ParseWarning {
        row: 9,
        kind: WarningKind::CoercedNumeric {
            field: "Bat Speed mph".to_string(),
            value: "fast".to_string(),
        },
    };

    assert_eq!(
        warning.to_string(),
        "Row 9: 'Bat Speed mph' value 'fast' is not numeric, stored as null"
    );

    let missing = ParseWarning {
        row: 2,
        kind: WarningKind::MissingDate,
    };
    assert!(missing.to_string().contains("missing date"));
}

#[test]
fn test_summary_format() {
    let stats = ParseStats {
        total_rows: 10,
        records_parsed: 7,
        blank_rows: 1,
        dropped_rows: 2,
        coerced_values: 3,
        warnings: Vec::new(),
    };

    assert_eq!(
        stats.summary(),
        "7 records from 10 rows (1 blank, 2 dropped, 3 values coerced)"
    );
}
