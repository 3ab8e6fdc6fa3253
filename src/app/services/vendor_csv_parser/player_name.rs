//! Player identity from export filenames
//!
//! Neither vendor writes the athlete's name inside the data rows, so identity
//! comes from the export naming convention. Each format supplies its own rule
//! through [`PlayerNameStrategy`]; a new vendor plugs in a new rule.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::app::models::SourceType;
use crate::constants::CSV_EXTENSION;

static BLAST_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Metrics - (.+?) -").expect("valid Blast filename pattern"));

static HITTRAX_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)data\.csv$").expect("valid HitTrax suffix pattern"));

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel-case pattern"));

/// Derives a player name from an export filename
pub trait PlayerNameStrategy: fmt::Debug + Send + Sync {
    fn player_name(&self, filename: &str) -> String;
}

/// `"Metrics - Jane Doe - 2024.csv"` -> `"Jane Doe"`
#[derive(Debug, Clone, Copy, Default)]
pub struct BlastFilenameRule;

impl PlayerNameStrategy for BlastFilenameRule {
    fn player_name(&self, filename: &str) -> String {
        match BLAST_NAME.captures(filename).and_then(|caps| caps.get(1)) {
            Some(name) => name.as_str().to_string(),
            None => filename
                .strip_suffix(CSV_EXTENSION)
                .unwrap_or(filename)
                .to_string(),
        }
    }
}

/// `"JohnSmithdata.csv"` -> `"John Smith"`
#[derive(Debug, Clone, Copy, Default)]
pub struct HitTraxFilenameRule;

impl PlayerNameStrategy for HitTraxFilenameRule {
    fn player_name(&self, filename: &str) -> String {
        let stem = HITTRAX_SUFFIX.replace(filename, "");
        CAMEL_BOUNDARY
            .replace_all(&stem, "$1 $2")
            .trim()
            .to_string()
    }
}

/// The built-in rule for a source
pub fn default_strategy(source: SourceType) -> Arc<dyn PlayerNameStrategy> {
    match source {
        SourceType::Blast => Arc::new(BlastFilenameRule),
        SourceType::HitTrax => Arc::new(HitTraxFilenameRule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blast_name_from_metrics_pattern() {
        let rule = BlastFilenameRule;
        assert_eq!(rule.player_name("Metrics - Jane Doe - 2024.csv"), "Jane Doe");
        assert_eq!(
            rule.player_name("Metrics - Jane Doe - Swings - 2024-01-01.csv"),
            "Jane Doe"
        );
    }

    #[test]
    fn test_blast_name_falls_back_to_stem() {
        let rule = BlastFilenameRule;
        assert_eq!(rule.player_name("jane_export.csv"), "jane_export");
        assert_eq!(rule.player_name("no_extension"), "no_extension");
    }

    #[test]
    fn test_hittrax_name_splits_camel_case() {
        let rule = HitTraxFilenameRule;
        assert_eq!(rule.player_name("JohnSmithdata.csv"), "John Smith");
        assert_eq!(rule.player_name("MaryJaneWatsonDATA.CSV"), "Mary Jane Watson");
        assert_eq!(rule.player_name("Sam Lee data.csv"), "Sam Lee");
    }

    #[test]
    fn test_hittrax_name_without_suffix() {
        let rule = HitTraxFilenameRule;
        assert_eq!(rule.player_name("JohnSmith.csv"), "John Smith.csv");
    }

    #[test]
    fn test_default_strategy_matches_source() {
        let blast = default_strategy(SourceType::Blast);
        let hittrax = default_strategy(SourceType::HitTrax);
        assert_eq!(blast.player_name("Metrics - A B - x.csv"), "A B");
        assert_eq!(hittrax.player_name("ABdata.csv"), "AB");
    }
}
