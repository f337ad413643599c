// Core algorithm exports
pub mod factors;
pub mod legacy;
pub mod ranker;
pub mod scoring;
pub mod strategy;
pub mod tables;

pub use factors::{interests_score, lifestyle_score, personality_score, values_score, TraitRule};
pub use legacy::LegacyScorer;
pub use ranker::{MatchRanker, RankOutcome, RankerConfig};
pub use scoring::{check_answers, verify, CompatibilityScorer, Scorer, ScoringError};
pub use strategy::ScoringStrategy;
