use crate::core::scoring::{check_answers, verify, Scorer, ScoringError};
use crate::core::tables::NEUTRAL_SCORE;
use crate::models::{Compatibility, Lifestyle, PersonalityTraits, Profile, ScoringWeights, SubScores};

/// Largest per-trait gap on the 1-5 scale
const MAX_TRAIT_GAP: f64 = 4.0;

/// Older, simpler compatibility formula still used by some clients
///
/// score = (
///     personality * 0.4 +     # 1 - normalized euclidean distance
///     values * 0.3 +          # exact answers only, objective included
///     hobbies * 0.2 +         # jaccard overlap of interests
///     lifestyle * 0.1         # exact answers only
/// )
///
/// It gives materially different numbers than [`CompatibilityScorer`] and
/// is kept as its own strategy.
///
/// [`CompatibilityScorer`]: crate::core::scoring::CompatibilityScorer
#[derive(Debug, Clone, Copy)]
pub struct LegacyScorer {
    weights: ScoringWeights,
}

impl LegacyScorer {
    pub fn new() -> Self {
        Self {
            weights: ScoringWeights::legacy(),
        }
    }
}

impl Default for LegacyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for LegacyScorer {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn score(&self, a: &Profile, b: &Profile) -> Result<Compatibility, ScoringError> {
        check_answers(a)?;
        check_answers(b)?;

        let (hobbies, shared_interests) = hobby_overlap(a, b);

        let breakdown = SubScores {
            personality: euclidean_personality(&a.personality_traits, &b.personality_traits),
            values: exact_values(a, b),
            interests: hobbies,
            lifestyle: exact_lifestyle(&a.lifestyle, &b.lifestyle),
        };

        verify(Compatibility {
            overall: self.weights.combine(&breakdown),
            breakdown: Some(breakdown),
            shared_interests,
        })
    }
}

fn euclidean_personality(a: &PersonalityTraits, b: &PersonalityTraits) -> f64 {
    let gaps: Vec<f64> = a
        .values()
        .into_iter()
        .zip(b.values())
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect();

    if gaps.is_empty() {
        return NEUTRAL_SCORE;
    }

    let distance = gaps.iter().map(|g| g * g).sum::<f64>().sqrt();
    let max_distance = MAX_TRAIT_GAP * (gaps.len() as f64).sqrt();

    (1.0 - distance / max_distance).clamp(0.0, 1.0)
}

fn exact_values(a: &Profile, b: &Profile) -> f64 {
    let objective = (
        a.objective.map(|o| o.as_str().to_string()),
        b.objective.map(|o| o.as_str().to_string()),
    );
    let va = a.values_goals.clone().unwrap_or_default();
    let vb = b.values_goals.clone().unwrap_or_default();

    let pairs = [
        objective,
        (va.life_goal, vb.life_goal),
        (va.core_value, vb.core_value),
        (va.future_vision, vb.future_vision),
    ];

    let mut compared = 0usize;
    let mut matched = 0usize;
    for pair in pairs {
        if let (Some(x), Some(y)) = pair {
            let (x, y) = (x.trim().to_string(), y.trim().to_string());
            if x.is_empty() || y.is_empty() {
                continue;
            }
            compared += 1;
            if x == y {
                matched += 1;
            }
        }
    }

    if compared == 0 {
        return NEUTRAL_SCORE;
    }
    matched as f64 / compared as f64
}

fn hobby_overlap(a: &Profile, b: &Profile) -> (f64, Vec<String>) {
    let ia = a.unique_interests();
    let ib = b.unique_interests();

    if ia.is_empty() || ib.is_empty() {
        return (NEUTRAL_SCORE, Vec::new());
    }

    let shared: Vec<String> = ia
        .iter()
        .filter(|tag| ib.contains(tag))
        .map(|tag| tag.to_string())
        .collect();
    let union = ia.len() + ib.len() - shared.len();

    (shared.len() as f64 / union as f64, shared)
}

fn exact_lifestyle(a: &Lifestyle, b: &Lifestyle) -> f64 {
    let mut compared = 0usize;
    let mut matched = 0usize;

    for ((_, x), (_, y)) in a.factors().into_iter().zip(b.factors()) {
        if let (Some(x), Some(y)) = (x, y) {
            compared += 1;
            if x == y {
                matched += 1;
            }
        }
    }

    if compared == 0 {
        return NEUTRAL_SCORE;
    }
    matched as f64 / compared as f64
}
