use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ScoringStrategy;
use crate::models::{validate_not_blank, Profile};

/// Request to find matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Falls back to `matching.default_limit` when absent; values above
    /// `matching.max_limit` are rejected by the handler
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
}

/// Request to score two profiles directly
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePairRequest {
    #[serde(default, alias = "profile_a")]
    pub profile_a: Option<Profile>,
    #[serde(default, alias = "profile_b")]
    pub profile_b: Option<Profile>,
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
}
