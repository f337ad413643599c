// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    to_percent, unique_tags, validate_not_blank, Breakdown, Compatibility, Lifestyle,
    MatchResult, Objective, PersonalityTraits, Profile, ScoringWeights, SkipReason,
    SkippedCandidate, SubScores, ValuesGoals,
};
pub use requests::{FindMatchesRequest, ScorePairRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, ScorePairResponse};
