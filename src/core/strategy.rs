use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::legacy::LegacyScorer;
use crate::core::scoring::{CompatibilityScorer, Scorer};
use crate::models::ScoringWeights;

/// Which compatibility formula to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// Four-factor scorer with mixed trait rules and lookup tables
    #[default]
    Canonical,
    /// Euclidean / exact-match formula kept for older clients
    Legacy,
}

impl ScoringStrategy {
    /// Build the scorer for this strategy
    ///
    /// `weights` only apply to the canonical scorer; the legacy formula has
    /// fixed weights.
    pub fn build(self, weights: ScoringWeights) -> Arc<dyn Scorer> {
        match self {
            ScoringStrategy::Canonical => Arc::new(CompatibilityScorer::new(weights)),
            ScoringStrategy::Legacy => Arc::new(LegacyScorer::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::Canonical => "canonical",
            ScoringStrategy::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canonical" => Ok(ScoringStrategy::Canonical),
            "legacy" => Ok(ScoringStrategy::Legacy),
            other => Err(format!(
                "unknown scoring strategy '{}', expected one of: canonical, legacy",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("canonical".parse(), Ok(ScoringStrategy::Canonical));
        assert_eq!(" Legacy ".parse(), Ok(ScoringStrategy::Legacy));
        assert!("euclid".parse::<ScoringStrategy>().is_err());
    }

    #[test]
    fn test_build_matches_name() {
        for strategy in [ScoringStrategy::Canonical, ScoringStrategy::Legacy] {
            let scorer = strategy.build(ScoringWeights::default());
            assert_eq!(scorer.name(), strategy.as_str());
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ScoringStrategy::Legacy).unwrap();
        assert_eq!(json, "\"legacy\"");
        let parsed: ScoringStrategy = serde_json::from_str("\"canonical\"").unwrap();
        assert_eq!(parsed, ScoringStrategy::Canonical);
    }
}
