//! Command-line argument definitions for Baseline Analytics
//!
//! This module defines the CLI interface using the clap derive API. Global
//! flags (verbosity, config file, snapshot path) apply to every subcommand.

use crate::app::models::SourceType;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the Baseline Analytics tool
///
/// Parses Blast Motion and HitTrax CSV exports into per-player time series,
/// then reports session trends or walks through a metric presentation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "baseline-analytics",
    version,
    about = "Turn Blast Motion and HitTrax exports into player trend reports",
    long_about = "Parses Blast Motion swing exports and HitTrax batted-ball exports, averages \
                  swings into sessions, fits trend lines per metric and keeps the parsed data \
                  in a local snapshot for later reports."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", global = true, help = "Only log errors")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Snapshot file override
    #[arg(
        long = "snapshot",
        value_name = "FILE",
        global = true,
        help = "Snapshot file to read and write instead of the default"
    )]
    pub snapshot_path: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse export files and report per-file status
    Ingest(IngestArgs),
    /// Show the latest value and trend of every metric for a player
    Trends(TrendsArgs),
    /// Walk through a player's selected metrics slide by slide
    Present(PresentArgs),
    /// Delete the saved snapshot
    Reset,
}

/// Arguments for the ingest command
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Blast Motion exports; directories are searched for .csv files
    #[arg(long = "blast", value_name = "PATH", num_args = 1..)]
    pub blast: Vec<PathBuf>,

    /// HitTrax exports; directories are searched for .csv files
    #[arg(long = "hittrax", value_name = "PATH", num_args = 1..)]
    pub hittrax: Vec<PathBuf>,

    /// Save the parsed data as the current snapshot
    #[arg(long = "save", help = "Replace the saved snapshot with the parsed files")]
    pub save: bool,

    /// Number of files parsed concurrently
    #[arg(short = 'j', long = "jobs", value_name = "COUNT")]
    pub jobs: Option<usize>,
}

/// Arguments for the trends command
#[derive(Debug, Clone, Parser)]
pub struct TrendsArgs {
    /// Player name; defaults to the first player in the snapshot
    #[arg(short = 'p', long = "player", value_name = "NAME")]
    pub player: Option<String>,

    /// Limit the report to one source (blast or hittrax)
    #[arg(short = 's', long = "source", value_name = "SOURCE")]
    pub source: Option<SourceType>,

    /// Use individual swings instead of session averages
    #[arg(long = "raw")]
    pub raw: bool,
}

/// Arguments for the present command
#[derive(Debug, Clone, Parser)]
pub struct PresentArgs {
    /// Player to present
    #[arg(short = 'p', long = "player", value_name = "NAME")]
    pub player: String,

    /// Metric keys in slide order; all available metrics when omitted
    #[arg(short = 'm', long = "metrics", value_name = "KEYS", value_delimiter = ',')]
    pub metrics: Vec<String>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(Commands::Ingest(ingest)) = &self.command {
            ingest.validate()?;
        }

        Ok(())
    }
}

impl IngestArgs {
    pub fn validate(&self) -> Result<()> {
        if self.blast.is_empty() && self.hittrax.is_empty() {
            return Err(Error::configuration(
                "Provide at least one --blast or --hittrax path",
            ));
        }

        if self.jobs == Some(0) {
            return Err(Error::configuration(
                "Number of jobs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Paths to ingest, grouped by source
    pub fn sources(&self) -> [(SourceType, &[PathBuf]); 2] {
        [
            (SourceType::Blast, self.blast.as_slice()),
            (SourceType::HitTrax, self.hittrax.as_slice()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["baseline-analytics"]).get_log_level(), "warn");
        assert_eq!(parse(&["baseline-analytics", "-vv"]).get_log_level(), "debug");
        assert_eq!(
            parse(&["baseline-analytics", "-vvv", "--quiet"]).get_log_level(),
            "error"
        );
    }

    #[test]
    fn test_ingest_args() {
        let args = parse(&[
            "baseline-analytics",
            "ingest",
            "--blast",
            "a.csv",
            "b.csv",
            "--hittrax",
            "exports/",
            "--save",
            "-v",
        ]);

        let Some(Commands::Ingest(ingest)) = &args.command else {
            panic!("expected ingest command");
        };
        assert_eq!(ingest.blast, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(ingest.hittrax, vec![PathBuf::from("exports/")]);
        assert!(ingest.save);
        assert_eq!(args.verbose, 1);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_ingest_requires_paths() {
        let args = parse(&["baseline-analytics", "ingest"]);
        assert!(matches!(args.validate(), Err(Error::Configuration { .. })));

        let args = parse(&["baseline-analytics", "ingest", "--blast", "a.csv", "-j", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_trends_source_parsing() {
        let args = parse(&["baseline-analytics", "trends", "--source", "hittrax", "--raw"]);

        let Some(Commands::Trends(trends)) = &args.command else {
            panic!("expected trends command");
        };
        assert_eq!(trends.source, Some(SourceType::HitTrax));
        assert!(trends.raw);
        assert!(trends.player.is_none());

        assert!(Args::try_parse_from(["baseline-analytics", "trends", "--source", "rapsodo"]).is_err());
    }

    #[test]
    fn test_present_metric_list() {
        let args = parse(&[
            "baseline-analytics",
            "present",
            "--player",
            "Jane Doe",
            "--metrics",
            "Bat Speed mph,AvgV",
        ]);

        let Some(Commands::Present(present)) = &args.command else {
            panic!("expected present command");
        };
        assert_eq!(present.player, "Jane Doe");
        assert_eq!(present.metrics, vec!["Bat Speed mph", "AvgV"]);
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["baseline-analytics", "--config", "/nonexistent/config.json", "reset"]);
        assert!(args.validate().is_err());
    }
}
