use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::core::scoring::{verify, CompatibilityScorer, Scorer};
use crate::models::{MatchResult, Profile, SkipReason, SkippedCandidate};

/// Lowest overall score (0-100) that makes it into a match list
pub const DEFAULT_MIN_SCORE: u8 = 20;

/// Batches larger than this are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerConfig {
    pub min_score: u8,
    pub parallel_threshold: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Result of ranking a candidate pool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankOutcome {
    pub matches: Vec<MatchResult>,
    pub skipped: Vec<SkippedCandidate>,
    pub total_candidates: usize,
}

enum Evaluation {
    Scored(MatchResult),
    Skipped(SkippedCandidate),
}

/// Turns a candidate pool into a sorted, capped match list
///
/// # Pipeline Stages
/// 1. Drop the current user from the pool
/// 2. Structural validation (`invalid_profile` skips)
/// 3. Pairwise scoring (`scoring_error` skips), parallel for large pools
/// 4. Minimum score threshold
/// 5. Stable sort by score, then truncate to the limit
///
/// A bad candidate never aborts the batch.
#[derive(Debug, Clone)]
pub struct MatchRanker {
    scorer: Arc<dyn Scorer>,
    config: RankerConfig,
}

impl MatchRanker {
    pub fn new(scorer: Arc<dyn Scorer>, config: RankerConfig) -> Self {
        Self { scorer, config }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(CompatibilityScorer::default()),
            RankerConfig::default(),
        )
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    /// Rank `candidates` against `current`
    ///
    /// # Arguments
    /// * `current` - The user asking for matches
    /// * `candidates` - Pool from the profile store; `None` marks a record
    ///   that could not be read at all
    /// * `limit` - Maximum number of matches; zero or negative yields none
    pub fn rank(
        &self,
        current: &Profile,
        candidates: Vec<Option<Profile>>,
        limit: i64,
    ) -> RankOutcome {
        let total_candidates = candidates.len();

        let pool: Vec<Option<Profile>> = candidates
            .into_iter()
            .filter(|candidate| {
                candidate
                    .as_ref()
                    .map_or(true, |profile| profile.id != current.id)
            })
            .collect();

        let evaluate = |candidate: &Option<Profile>| self.evaluate(current, candidate.as_ref());

        // Order-preserving in both branches; everything below runs after
        // every candidate has been evaluated.
        let evaluations: Vec<Evaluation> = if pool.len() > self.config.parallel_threshold {
            pool.par_iter().map(evaluate).collect()
        } else {
            pool.iter().map(evaluate).collect()
        };

        let mut matches = Vec::with_capacity(evaluations.len());
        let mut skipped = Vec::new();
        for evaluation in evaluations {
            match evaluation {
                Evaluation::Scored(m) if m.overall_score >= self.config.min_score => matches.push(m),
                Evaluation::Scored(_) => {}
                Evaluation::Skipped(s) => skipped.push(s),
            }
        }

        // Vec::sort_by is stable, so equal scores keep pool order
        matches.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));

        match usize::try_from(limit) {
            Ok(limit) if limit > 0 => matches.truncate(limit),
            _ => matches.clear(),
        }

        tracing::debug!(
            "Ranked {} candidates for {} with {} scorer: {} matches, {} skipped",
            total_candidates,
            current.id,
            self.scorer.name(),
            matches.len(),
            skipped.len()
        );

        RankOutcome {
            matches,
            skipped,
            total_candidates,
        }
    }

    fn evaluate(&self, current: &Profile, candidate: Option<&Profile>) -> Evaluation {
        let Some(candidate) = candidate else {
            tracing::warn!("Skipping null candidate record");
            return skip(None, SkipReason::InvalidProfile);
        };

        if let Err(errors) = candidate.validate() {
            tracing::warn!("Skipping invalid candidate profile: {}", errors);
            return skip(Some(candidate), SkipReason::InvalidProfile);
        }

        let scored = self
            .scorer
            .score(current, candidate)
            .and_then(verify)
            .map(|compatibility| MatchResult::from_compatibility(candidate, compatibility));

        match scored {
            Ok(Some(result)) => Evaluation::Scored(result),
            Ok(None) => {
                tracing::warn!("Scorer returned no breakdown for candidate {}", candidate.id);
                skip(Some(candidate), SkipReason::ScoringError)
            }
            Err(e) => {
                tracing::warn!("Failed to score candidate {}: {}", candidate.id, e);
                skip(Some(candidate), SkipReason::ScoringError)
            }
        }
    }
}

impl Default for MatchRanker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn skip(candidate: Option<&Profile>, reason: SkipReason) -> Evaluation {
    let candidate_id = candidate
        .map(|profile| profile.id.trim())
        .filter(|id| !id.is_empty())
        .map(String::from);

    Evaluation::Skipped(SkippedCandidate {
        candidate_id,
        reason,
    })
}
