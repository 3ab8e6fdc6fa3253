//! Command implementations for the Baseline Analytics CLI
//!
//! Each subcommand lives in its own module; `run` sets up logging and
//! configuration once and dispatches.

pub mod ingest;
pub mod present;
pub mod shared;
pub mod trends;

use anyhow::Result;
use colored::*;
use tracing::debug;

use crate::cli::args::{Args, Commands};
use shared::{load_configuration, open_store, setup_logging};

/// Main command runner
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = args.command else {
        return Ok(());
    };

    match command {
        Commands::Ingest(ingest_args) => ingest::run_ingest(ingest_args, config).await,
        Commands::Trends(trends_args) => trends::run_trends(trends_args, &config),
        Commands::Present(present_args) => present::run_present(present_args, &config),
        Commands::Reset => {
            let store = open_store(&config)?;
            if store.clear()? {
                println!(
                    "{} {}",
                    "Removed snapshot".bright_green(),
                    store.path().display()
                );
            } else {
                println!("{}", "No snapshot to remove".bright_yellow());
            }
            Ok(())
        }
    }
}
