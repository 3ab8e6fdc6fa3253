//! Chart series builders
//!
//! Turns records into the point sequences a chart draws: one metric over time
//! for a single player, or one metric per date across several players.

use serde::Serialize;
use std::collections::HashMap;

use crate::app::models::{Record, TrendInput, TrendLine};
use crate::app::services::trend::fit_trend_line;
use crate::constants::MAX_COMPARISON_PLAYERS;

/// One plotted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: String,
    pub timestamp: i64,
    pub value: f64,
}

/// Points for `metric`, skipping records where it is not a number
///
/// Input order is kept; records from a parser or the aggregator are already sorted.
pub fn metric_series<R: AsRef<Record>>(records: &[R], metric: &str) -> Vec<SeriesPoint> {
    records
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|record| {
            record
                .number(metric)
                .filter(|value| value.is_finite())
                .map(|value| SeriesPoint {
                    date: record.date_str.clone(),
                    timestamp: record.timestamp,
                    value,
                })
        })
        .collect()
}

/// Trend line over a series, with timestamps as x
pub fn series_trend(series: &[SeriesPoint]) -> Option<TrendLine> {
    let inputs: Vec<TrendInput> = series
        .iter()
        .map(|point| TrendInput::new(point.timestamp as f64, Some(point.value)))
        .collect();
    fit_trend_line(&inputs)
}

/// One date in a comparison chart; `values[i]` belongs to `players[i]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub date: String,
    pub timestamp: i64,
    pub values: Vec<Option<f64>>,
}

/// A metric across several players, merged by date label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub metric: String,
    pub players: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Merge up to three players' records for `metric`
///
/// Extra players beyond the limit are ignored. Rows are keyed by `date_str`; the
/// row timestamp comes from the first record seen for that label, and a later
/// record with the same label overwrites that player's value. Rows with no value
/// for any player are dropped.
pub fn comparison_series<R: AsRef<Record>>(
    players: &[(&str, &[R])],
    metric: &str,
) -> ComparisonSeries {
    let players = &players[..players.len().min(MAX_COMPARISON_PLAYERS)];
    let mut rows: Vec<ComparisonRow> = Vec::new();
    let mut index_by_date: HashMap<String, usize> = HashMap::new();

    for (slot, (_, records)) in players.iter().enumerate() {
        for record in records.iter().map(AsRef::as_ref) {
            let index = *index_by_date
                .entry(record.date_str.clone())
                .or_insert_with(|| {
                    rows.push(ComparisonRow {
                        date: record.date_str.clone(),
                        timestamp: record.timestamp,
                        values: vec![None; players.len()],
                    });
                    rows.len() - 1
                });
            rows[index].values[slot] = record.number(metric).filter(|value| value.is_finite());
        }
    }

    rows.retain(|row| row.values.iter().any(Option::is_some));
    rows.sort_by_key(|row| row.timestamp);

    ComparisonSeries {
        metric: metric.to_string(),
        players: players.iter().map(|(name, _)| name.to_string()).collect(),
        rows,
    }
}
