//! Ingest command implementation
//!
//! Reads export files from disk, parses them as one concurrent batch, prints a
//! status line per file and a per-player summary, and optionally saves the
//! result as the current snapshot.

use anyhow::{Result, bail};
use chrono::DateTime;
use colored::*;
use tracing::{debug, info};

use super::shared::open_store;
use crate::app::adapters::filesystem::{collect_csv_files, read_request};
use crate::app::models::{Dataset, ParsedFile};
use crate::app::services::batch_ingest::{BatchReport, FileReport, FileStatus, ingest_batch};
use crate::app::services::roster::PlayerRoster;
use crate::app::services::session_aggregator::aggregate_by_session;
use crate::cli::args::IngestArgs;
use crate::config::AnalyticsConfig;

/// Warnings printed per file before the rest are summarized
const MAX_WARNINGS_SHOWN: usize = 3;

pub async fn run_ingest(args: IngestArgs, mut config: AnalyticsConfig) -> Result<()> {
    if let Some(jobs) = args.jobs {
        config = config.with_max_concurrent_files(jobs);
    }

    println!("{}", "Discovering export files...".bright_yellow());
    let mut requests = Vec::new();
    for (source, paths) in args.sources() {
        if paths.is_empty() {
            continue;
        }

        let files = collect_csv_files(paths)?;
        println!(
            "  {} {} {} files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold(),
            source.label()
        );

        for path in files {
            requests.push(read_request(&path, source)?);
        }
    }

    if requests.is_empty() {
        bail!("No CSV files found in the given paths");
    }

    for pending in BatchReport::pending(&requests).files {
        debug!("Queued {} ({}): {}", pending.filename, pending.source, pending.status);
    }

    println!("\n{}", "Parsing files...".bright_yellow());
    let report = ingest_batch(requests, &config).await;
    for file_report in &report.files {
        print_file_report(file_report);
    }

    println!("\n{}", "Ingest Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Files parsed:".bright_cyan(),
        report.succeeded().to_string().bright_white()
    );
    if report.failed() > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            report.failed().to_string().bright_red().bold()
        );
    }

    if report.succeeded() == 0 {
        bail!("No files were parsed successfully");
    }

    let dataset = report.into_dataset();
    print_player_summary(&dataset);

    if args.save {
        let store = open_store(&config)?;
        store.save(&dataset)?;
        println!(
            "\n{} {}",
            "Saved snapshot".bright_green(),
            store.path().display()
        );
    } else {
        info!("Snapshot not saved; pass --save to keep this data");
    }

    Ok(())
}

fn print_file_report(report: &FileReport) {
    match &report.status {
        FileStatus::Success => {
            let player = report.player_name().unwrap_or_default();
            let summary = report
                .stats
                .as_ref()
                .map(|stats| stats.summary())
                .unwrap_or_default();
            println!(
                "  {} {} {} {}",
                "OK".bright_green(),
                report.filename,
                format!("[{}]", player).bright_white(),
                summary.dimmed()
            );

            if let Some(stats) = report.stats.as_ref().filter(|stats| stats.has_warnings()) {
                for warning in stats.warnings.iter().take(MAX_WARNINGS_SHOWN) {
                    println!("      {}", warning.to_string().yellow());
                }
                if stats.warnings.len() > MAX_WARNINGS_SHOWN {
                    println!(
                        "      {}",
                        format!(
                            "... and {} more warnings",
                            stats.warnings.len() - MAX_WARNINGS_SHOWN
                        )
                        .yellow()
                    );
                }
            }
        }
        FileStatus::Error(message) => {
            println!(
                "  {} {}: {}",
                "FAILED".bright_red(),
                report.filename,
                message
            );
        }
        FileStatus::Pending => {
            println!("  {} {}", "PENDING".bright_cyan(), report.filename);
        }
    }
}

fn print_player_summary(dataset: &Dataset) {
    let roster = PlayerRoster::from_dataset(dataset);

    println!("\n{}", "Players".bright_green().bold());
    for player in roster.players() {
        println!("  {}", player.name.bright_white().bold());
        for source in player.sources() {
            if let Some(file) = player.file(source) {
                println!("    {} {}", format!("{}:", source.label()).bright_cyan(), describe(file));
            }
        }
    }
}

/// `"120 rows, 5 sessions (2024-01-01 to 2024-02-01)"`
fn describe(file: &ParsedFile) -> String {
    let sessions = aggregate_by_session(&file.records).len();
    let span = file
        .time_span()
        .map(|(first, last)| format!(" ({} to {})", format_day(first), format_day(last)))
        .unwrap_or_default();

    format!("{} rows, {} sessions{}", file.records.len(), sessions, span)
}

fn format_day(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
