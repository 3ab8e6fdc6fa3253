//! Present command implementation
//!
//! Builds a presentation deck for one player and prints each slide in order:
//! the session values for the metric and the fitted trend.

use anyhow::Result;
use colored::*;

use super::shared::{format_slope, format_value, load_dataset};
use crate::app::services::presentation::{PresentationDeck, Slide, available_metrics};
use crate::app::services::roster::PlayerRoster;
use crate::cli::args::PresentArgs;
use crate::config::AnalyticsConfig;
use crate::Error;

pub fn run_present(args: PresentArgs, config: &AnalyticsConfig) -> Result<()> {
    let dataset = load_dataset(config)?;
    let roster = PlayerRoster::from_dataset(&dataset);

    let keys: Vec<&str> = if args.metrics.is_empty() {
        let player = roster
            .get(&args.player)
            .ok_or_else(|| Error::player_not_found(&args.player))?;
        available_metrics(player)
            .into_iter()
            .map(|(_, metric)| metric.key)
            .collect()
    } else {
        args.metrics.iter().map(|key| key.trim()).collect()
    };

    let mut deck = PresentationDeck::build(&roster, &args.player, &keys)?;
    if deck.is_empty() {
        println!(
            "{} none of the selected metrics are available for {}",
            "Note:".bright_yellow(),
            args.player
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Presentation for".bright_green().bold(),
        deck.player.bright_white().bold()
    );

    let total = deck.len();
    for index in 0..total {
        if index > 0 {
            deck.next();
        }
        if let Some(slide) = deck.current() {
            print_slide(deck.position() + 1, total, slide);
        }
    }

    Ok(())
}

fn print_slide(number: usize, total: usize, slide: &Slide) {
    println!(
        "\n{} {} {}",
        format!("[{}/{}]", number, total).bright_cyan(),
        slide.metric.label.bright_white().bold(),
        format!("({}, {})", slide.source.label(), slide.metric.category).dimmed()
    );

    if slide.series.is_empty() {
        println!("  {}", "No data available for this metric".dimmed());
        return;
    }

    for point in &slide.series {
        println!(
            "  {:<12} {:>12}",
            point.date,
            format_value(point.value, slide.metric.unit)
        );
    }

    match &slide.trend {
        Some(trend) => println!(
            "  {} {} -> {} ({})",
            "Trend:".bright_cyan(),
            format_value(trend.p0.y, slide.metric.unit),
            format_value(trend.p1.y, slide.metric.unit),
            format_slope(trend.slope_per_day(), slide.metric.unit)
        ),
        None => println!("  {} {}", "Trend:".bright_cyan(), "not enough sessions".dimmed()),
    }
}
