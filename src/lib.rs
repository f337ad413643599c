//! Kindred Algo - Compatibility scoring and match ranking for the Kindred app
//!
//! This library holds the pure core: a deterministic pairwise compatibility
//! scorer with a four-factor breakdown, an alternate legacy scorer, and the
//! ranker that turns a candidate pool into a sorted, capped match list.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    CompatibilityScorer, LegacyScorer, MatchRanker, RankOutcome, RankerConfig, Scorer,
    ScoringError, ScoringStrategy,
};
pub use models::{
    Breakdown, Compatibility, MatchResult, Profile, ScoringWeights, SkipReason, SkippedCandidate,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let scorer = ScoringStrategy::default().build(ScoringWeights::default());
        let a = Profile::new("a");
        assert!(scorer.score_pair(Some(&a), None).overall == 0.0);
    }
}
