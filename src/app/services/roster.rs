//! Player roster
//!
//! Indexes a [`Dataset`] by player name so callers can ask for one player's raw
//! or session-level records per source, or compare several players.

use tracing::debug;

use crate::app::models::{Dataset, ParsedFile, Record, SessionRecord, SourceType};
use crate::app::services::series::{ComparisonSeries, comparison_series};
use crate::app::services::session_aggregator::aggregate_by_session;
use crate::{Error, Result};

/// One player's latest file per source
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEntry {
    pub name: String,
    pub blast: Option<ParsedFile>,
    pub hittrax: Option<ParsedFile>,
}

impl PlayerEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            blast: None,
            hittrax: None,
        }
    }

    pub fn file(&self, source: SourceType) -> Option<&ParsedFile> {
        match source {
            SourceType::Blast => self.blast.as_ref(),
            SourceType::HitTrax => self.hittrax.as_ref(),
        }
    }

    /// Sources this player has data for, Blast first
    pub fn sources(&self) -> Vec<SourceType> {
        SourceType::ALL
            .into_iter()
            .filter(|source| self.file(*source).is_some())
            .collect()
    }

    fn set_file(&mut self, file: ParsedFile) {
        match file.source_type {
            SourceType::Blast => self.blast = Some(file),
            SourceType::HitTrax => self.hittrax = Some(file),
        }
    }
}

/// Players in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRoster {
    players: Vec<PlayerEntry>,
}

impl PlayerRoster {
    /// Build from a dataset, reading Blast files before HitTrax files
    ///
    /// A later file for the same player and source replaces the earlier one.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut roster = Self::default();

        for file in dataset.blast.iter().chain(dataset.hittrax.iter()) {
            let index = match roster.position(&file.player_name) {
                Some(index) => index,
                None => {
                    roster.players.push(PlayerEntry::new(&file.player_name));
                    roster.players.len() - 1
                }
            };

            if roster.players[index].file(file.source_type).is_some() {
                debug!(
                    "Replacing {} data for {} with {}",
                    file.source_type, file.player_name, file.original_filename
                );
            }
            roster.players[index].set_file(file.clone());
        }

        roster
    }

    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|player| player.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerEntry> {
        self.players.iter().find(|player| player.name == name)
    }

    /// The player selected when none is named
    pub fn default_player(&self) -> Option<&PlayerEntry> {
        self.players.first()
    }

    /// Raw records for a player and source; empty when either is unknown
    pub fn records(&self, name: &str, source: SourceType) -> &[Record] {
        self.get(name)
            .and_then(|player| player.file(source))
            .map(|file| file.records.as_slice())
            .unwrap_or_default()
    }

    /// Session-aggregated records for a player and source
    pub fn sessions(&self, name: &str, source: SourceType) -> Vec<SessionRecord> {
        aggregate_by_session(self.records(name, source))
    }

    /// Compare one metric across named players
    ///
    /// Every name must be on the roster. Session records are compared when
    /// `by_session` is set, raw records otherwise.
    pub fn comparison(
        &self,
        names: &[&str],
        source: SourceType,
        metric: &str,
        by_session: bool,
    ) -> Result<ComparisonSeries> {
        if let Some(missing) = names.iter().find(|name| self.get(name).is_none()) {
            return Err(Error::player_not_found(*missing));
        }

        if by_session {
            let sessions: Vec<(&str, Vec<SessionRecord>)> = names
                .iter()
                .map(|name| (*name, self.sessions(name, source)))
                .collect();
            let players: Vec<(&str, &[SessionRecord])> = sessions
                .iter()
                .map(|(name, records)| (*name, records.as_slice()))
                .collect();
            Ok(comparison_series(&players, metric))
        } else {
            let players: Vec<(&str, &[Record])> = names
                .iter()
                .map(|name| (*name, self.records(name, source)))
                .collect();
            Ok(comparison_series(&players, metric))
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|player| player.name == name)
    }
}
