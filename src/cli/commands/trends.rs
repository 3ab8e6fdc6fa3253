//! Trends command implementation
//!
//! Prints, for each catalog metric a player has data for, the latest value,
//! the number of points behind it and the fitted trend per day.

use anyhow::{Result, anyhow};
use colored::*;
use tracing::debug;

use super::shared::{format_slope, format_value, load_dataset};
use crate::app::models::{MetricDef, Record, SourceType};
use crate::app::services::roster::{PlayerEntry, PlayerRoster};
use crate::app::services::series::{SeriesPoint, metric_series, series_trend};
use crate::app::services::session_aggregator::aggregate_by_session;
use crate::cli::args::TrendsArgs;
use crate::config::AnalyticsConfig;
use crate::constants::metric_catalog;
use crate::Error;

pub fn run_trends(args: TrendsArgs, config: &AnalyticsConfig) -> Result<()> {
    let dataset = load_dataset(config)?;
    let roster = PlayerRoster::from_dataset(&dataset);

    let player = select_player(&roster, args.player.as_deref())?;
    let sources: Vec<SourceType> = match args.source {
        Some(source) => vec![source],
        None => player.sources(),
    };

    println!(
        "{} {}",
        "Trends for".bright_green().bold(),
        player.name.bright_white().bold()
    );

    for source in sources {
        let Some(file) = player.file(source) else {
            println!("\n  {} no {} data", "Note:".bright_yellow(), source.label());
            continue;
        };

        let view = if args.raw { "swings" } else { "sessions" };
        println!(
            "\n{} {}",
            source.label().bright_cyan().bold(),
            format!("({}, {})", file.original_filename, view).dimmed()
        );

        if args.raw {
            print_metric_rows(source, &file.records);
        } else {
            print_metric_rows(source, &aggregate_by_session(&file.records));
        }
    }

    Ok(())
}

/// Named player, or the roster's first player
fn select_player<'a>(roster: &'a PlayerRoster, name: Option<&str>) -> Result<&'a PlayerEntry> {
    match name {
        Some(name) => roster
            .get(name)
            .ok_or_else(|| Error::player_not_found(name).into()),
        None => roster
            .default_player()
            .ok_or_else(|| anyhow!("Snapshot contains no players")),
    }
}

fn print_metric_rows<R: AsRef<Record>>(source: SourceType, records: &[R]) {
    let mut shown = 0;
    for metric in metric_catalog(source) {
        let series = metric_series(records, metric.key);
        let Some(line) = trend_row(metric, &series) else {
            debug!("No values for {}", metric.key);
            continue;
        };
        println!("  {}", line);
        shown += 1;
    }

    if shown == 0 {
        println!("  {}", "No catalog metrics found in this file".dimmed());
    }
}

/// One formatted line, or `None` when the series is empty
fn trend_row(metric: &MetricDef, series: &[SeriesPoint]) -> Option<String> {
    let latest = series.last()?;
    let trend = series_trend(series)
        .map(|line| format_slope(line.slope_per_day(), metric.unit))
        .unwrap_or_else(|| "n/a".to_string());

    Some(format!(
        "{:<26} {:>12}  {:>4} pts  trend {}",
        metric.label,
        format_value(latest.value, metric.unit),
        series.len(),
        trend
    ))
}
