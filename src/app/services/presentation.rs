//! Presentation deck
//!
//! A deck walks through one player's selected metrics, one slide per metric,
//! each showing the session-level series and its trend line.

use serde::Serialize;
use tracing::debug;

use crate::app::models::{MetricDef, SourceType, TrendLine};
use crate::app::services::roster::{PlayerEntry, PlayerRoster};
use crate::app::services::series::{SeriesPoint, metric_series, series_trend};
use crate::app::services::session_aggregator::aggregate_by_session;
use crate::constants::metric_catalog;
use crate::{Error, Result};

/// One metric's slide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub source: SourceType,
    pub metric: MetricDef,
    pub series: Vec<SeriesPoint>,
    pub trend: Option<TrendLine>,
}

impl Slide {
    /// Most recent session value
    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.series.last()
    }
}

/// Metrics a player can present: the catalog of every source they have data for
pub fn available_metrics(player: &PlayerEntry) -> Vec<(SourceType, &'static MetricDef)> {
    player
        .sources()
        .into_iter()
        .flat_map(|source| {
            metric_catalog(source)
                .iter()
                .map(move |metric| (source, metric))
        })
        .collect()
}

/// Slides in selection order with a clamped cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationDeck {
    pub player: String,
    slides: Vec<Slide>,
    position: usize,
}

impl PresentationDeck {
    /// Build a deck for `player` from the selected metric keys
    ///
    /// Keys the player has no catalog entry for are skipped.
    pub fn build(roster: &PlayerRoster, player: &str, metric_keys: &[&str]) -> Result<Self> {
        let entry = roster
            .get(player)
            .ok_or_else(|| Error::player_not_found(player))?;
        let available = available_metrics(entry);

        let slides = metric_keys
            .iter()
            .filter_map(|key| {
                let found = available.iter().find(|(_, metric)| metric.key == *key);
                if found.is_none() {
                    debug!("Metric '{}' not available for {}", key, player);
                }
                found
            })
            .filter_map(|(source, metric)| {
                let file = entry.file(*source)?;
                let sessions = aggregate_by_session(&file.records);
                let series = metric_series(&sessions, metric.key);
                let trend = series_trend(&series);
                Some(Slide {
                    source: *source,
                    metric: **metric,
                    series,
                    trend,
                })
            })
            .collect();

        Ok(Self {
            player: player.to_string(),
            slides,
            position: 0,
        })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Zero-based cursor
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.position)
    }

    /// Advance; stays on the last slide
    pub fn next(&mut self) -> Option<&Slide> {
        if self.position + 1 < self.slides.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Go back; stays on the first slide
    pub fn prev(&mut self) -> Option<&Slide> {
        self.position = self.position.saturating_sub(1);
        self.current()
    }
}
