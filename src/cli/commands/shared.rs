//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and snapshot access used by every
//! subcommand.

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::app::adapters::filesystem::SnapshotStore;
use crate::app::models::Dataset;
use crate::cli::args::Args;
use crate::config::AnalyticsConfig;

/// Set up structured logging to stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("baseline_analytics={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Configuration from `--config` (or defaults) with command-line overrides applied
pub fn load_configuration(args: &Args) -> Result<AnalyticsConfig> {
    let mut config = match &args.config_file {
        Some(path) => AnalyticsConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };

    if let Some(snapshot) = &args.snapshot_path {
        config = config.with_snapshot_path(snapshot.clone());
    }

    Ok(config)
}

pub fn open_store(config: &AnalyticsConfig) -> Result<SnapshotStore> {
    SnapshotStore::from_config(&config.storage).context("Failed to locate snapshot file")
}

/// Load the saved dataset, failing when nothing has been ingested yet
pub fn load_dataset(config: &AnalyticsConfig) -> Result<Dataset> {
    let store = open_store(config)?;
    match store.load()? {
        Some(dataset) => Ok(dataset),
        None => bail!(
            "No saved data at {}. Run `baseline-analytics ingest --save` first",
            store.path().display()
        ),
    }
}

/// Format a metric value with its unit
pub fn format_value(value: f64, unit: &str) -> String {
    match unit {
        "" => format!("{:.2}", value),
        "%" => format!("{:.1}%", value),
        unit => format!("{:.1} {}", value, unit),
    }
}

/// Format a daily slope with an explicit sign
pub fn format_slope(per_day: f64, unit: &str) -> String {
    let spacer = if unit.is_empty() || unit == "%" { "" } else { " " };
    format!("{:+.3}{}{}/day", per_day, spacer, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(62.456, "mph"), "62.5 mph");
        assert_eq!(format_value(31.24, "%"), "31.2%");
        assert_eq!(format_value(0.3333, ""), "0.33");
    }

    #[test]
    fn test_format_slope() {
        assert_eq!(format_slope(0.25, "mph"), "+0.250 mph/day");
        assert_eq!(format_slope(-1.0, ""), "-1.000/day");
        assert_eq!(format_slope(0.5, "%"), "+0.500%/day");
    }

    #[test]
    fn test_load_configuration_applies_snapshot_override() {
        use clap::Parser;

        let args = Args::try_parse_from(["baseline-analytics", "--snapshot", "/tmp/s.json", "reset"])
            .unwrap();
        let config = load_configuration(&args).unwrap();

        assert_eq!(
            config.storage.snapshot_path,
            Some(std::path::PathBuf::from("/tmp/s.json"))
        );
    }
}
