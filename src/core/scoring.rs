use thiserror::Error;

use crate::core::factors::{interests_score, lifestyle_score, personality_score, values_score};
use crate::models::{Compatibility, Profile, ScoringWeights, SubScores};

/// Errors a scorer can report for a single pair
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("{component} score is not a finite number")]
    NonFinite { component: &'static str },

    #[error("{component} score {value} is outside [0, 1]")]
    OutOfRange { component: &'static str, value: f64 },

    #[error("comparable pair produced no breakdown")]
    MissingBreakdown,

    #[error("{component} answer {value} is outside its {min}-{max} scale")]
    InvalidAnswer {
        component: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A compatibility formula
///
/// Implementations are pure and must be symmetric in their arguments.
pub trait Scorer: std::fmt::Debug + Send + Sync {
    /// Short name used in logs and responses
    fn name(&self) -> &'static str;

    /// Compare two profiles
    fn score(&self, a: &Profile, b: &Profile) -> Result<Compatibility, ScoringError>;

    /// Null-tolerant comparison
    ///
    /// A missing profile or a failed computation yields the neutral zero
    /// sentinel instead of an error.
    fn score_pair(&self, a: Option<&Profile>, b: Option<&Profile>) -> Compatibility {
        let (Some(a), Some(b)) = (a, b) else {
            return Compatibility::neutral_zero();
        };

        self.score(a, b).unwrap_or_else(|e| {
            tracing::warn!(
                "{} scorer failed for {} / {}: {}",
                self.name(),
                a.id,
                b.id,
                e
            );
            Compatibility::neutral_zero()
        })
    }
}

/// Reject results that are not finite or fall outside [0, 1]
pub fn verify(compatibility: Compatibility) -> Result<Compatibility, ScoringError> {
    let Some(breakdown) = compatibility.breakdown else {
        return Err(ScoringError::MissingBreakdown);
    };

    let overall = ("overall", compatibility.overall);
    for (component, value) in std::iter::once(overall).chain(breakdown.components()) {
        if !value.is_finite() {
            return Err(ScoringError::NonFinite { component });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ScoringError::OutOfRange { component, value });
        }
    }

    Ok(compatibility)
}

const TRAIT_SCALE: (f64, f64) = (1.0, 5.0);
const LIFESTYLE_SCALE: (f64, f64) = (1.0, 3.0);

/// Reject raw answers that are not finite or fall outside their scale
///
/// The factor formulas clamp their output, so a bad answer would otherwise
/// pass through as a plausible score.
pub fn check_answers(profile: &Profile) -> Result<(), ScoringError> {
    let traits = profile
        .personality_traits
        .values()
        .into_iter()
        .map(|value| ("personality", value, TRAIT_SCALE));
    let lifestyle = profile
        .lifestyle
        .factors()
        .into_iter()
        .map(|(_, value)| ("lifestyle", value, LIFESTYLE_SCALE));

    for (component, value, (min, max)) in traits.chain(lifestyle) {
        let Some(value) = value else {
            continue;
        };
        if !value.is_finite() {
            return Err(ScoringError::NonFinite { component });
        }
        if !(min..=max).contains(&value) {
            return Err(ScoringError::InvalidAnswer {
                component,
                value,
                min,
                max,
            });
        }
    }

    Ok(())
}

/// Weighted four-factor compatibility scorer
///
/// overall = (
///     personality * 0.35 +     # mixed similarity / complementary traits
///     values * 0.30 +          # life goal, core value, future vision
///     interests * 0.25 +       # exact tags and shared categories
///     lifestyle * 0.10         # closeness of lifestyle answers
/// )
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
}

impl CompatibilityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }
}

impl Scorer for CompatibilityScorer {
    fn name(&self) -> &'static str {
        "canonical"
    }

    fn score(&self, a: &Profile, b: &Profile) -> Result<Compatibility, ScoringError> {
        check_answers(a)?;
        check_answers(b)?;

        let (interests, shared_interests) = interests_score(&a.interests, &b.interests);

        let breakdown = SubScores {
            personality: personality_score(&a.personality_traits, &b.personality_traits),
            values: values_score(a.values_goals.as_ref(), b.values_goals.as_ref()),
            interests,
            lifestyle: lifestyle_score(&a.lifestyle, &b.lifestyle),
        };

        verify(Compatibility {
            overall: self.weights.combine(&breakdown),
            breakdown: Some(breakdown),
            shared_interests,
        })
    }
}
