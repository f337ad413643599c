use serde::{Deserialize, Serialize};

use crate::core::ScoringStrategy;
use crate::models::domain::{Breakdown, MatchResult, SkippedCandidate};

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResult>,
    pub skipped: Vec<SkippedCandidate>,
    pub total_candidates: usize,
    pub strategy: ScoringStrategy,
}

/// Response for the pairwise score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePairResponse {
    pub overall_score: u8,
    pub breakdown: Option<Breakdown>,
    pub shared_interests: Vec<String>,
    pub comparable: bool,
    pub strategy: ScoringStrategy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub strategy: ScoringStrategy,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
