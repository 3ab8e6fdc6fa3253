use baseline_analytics::cli::{args::Args, commands};
use clap::Parser;
use colored::*;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Baseline Analytics - Swing Data Trend Reports");
    println!("=============================================");
    println!();
    println!("Parse Blast Motion and HitTrax CSV exports, average swings into sessions");
    println!("and follow each metric's trend over time.");
    println!();
    println!("USAGE:");
    println!("    baseline-analytics <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Parse export files (--blast / --hittrax) and optionally --save them");
    println!("    trends      Show latest values and trends for a player's metrics");
    println!("    present     Print a slide-by-slide metric presentation for a player");
    println!("    reset       Delete the saved snapshot");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Only log errors");
    println!("    -c, --config     Path to configuration file (JSON)");
    println!();
    println!("EXAMPLES:");
    println!("    baseline-analytics ingest --blast exports/blast --hittrax exports/hittrax --save");
    println!("    baseline-analytics trends --player \"Jane Doe\"");
    println!("    baseline-analytics present --player \"Jane Doe\" --metrics \"Bat Speed mph,AvgV\"");
    println!();
    println!("For more information on a specific command, use:");
    println!("    baseline-analytics <COMMAND> --help");
}
