use crate::core::tables::{
    core_value_affinity, future_vision_affinity, interest_category, life_goal_affinity,
    INTEREST_CATEGORIES, NEUTRAL_SCORE,
};
use crate::models::{unique_tags, Lifestyle, PersonalityTraits, ValuesGoals};

const SIMILARITY_SHARE: f64 = 0.7;
const COMPLEMENTARY_SHARE: f64 = 0.3;

const LIFE_GOAL_WEIGHT: f64 = 0.40;
const CORE_VALUE_WEIGHT: f64 = 0.35;
const FUTURE_VISION_WEIGHT: f64 = 0.25;

const EXACT_INTEREST_SHARE: f64 = 0.7;
const CATEGORY_INTEREST_SHARE: f64 = 0.3;

/// How a single Big Five trait is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitRule {
    /// Closer answers score higher
    Similarity,
    /// Moderate difference is rewarded, capped at two points
    Complementary,
    /// Both partners being high scores higher, however close they are
    AbsoluteLevel,
}

impl TraitRule {
    #[inline]
    pub fn contribution(self, a: f64, b: f64) -> f64 {
        match self {
            TraitRule::Similarity => 1.0 - (a - b).abs() / 4.0,
            TraitRule::Complementary => (a - b).abs().min(2.0) / 2.0,
            TraitRule::AbsoluteLevel => (a + b) / 2.0 / 5.0,
        }
    }
}

fn trait_pairs(
    a: &PersonalityTraits,
    b: &PersonalityTraits,
) -> [(TraitRule, Option<f64>, Option<f64>); 5] {
    [
        (TraitRule::Complementary, a.extraversion, b.extraversion),
        (TraitRule::Similarity, a.agreeableness, b.agreeableness),
        (TraitRule::Similarity, a.conscientiousness, b.conscientiousness),
        (TraitRule::AbsoluteLevel, a.emotional_stability, b.emotional_stability),
        (TraitRule::Similarity, a.openness, b.openness),
    ]
}

/// Personality sub-score (0-1)
///
/// Traits missing on either side are left out of both the sums and the count.
pub fn personality_score(a: &PersonalityTraits, b: &PersonalityTraits) -> f64 {
    let mut similarity = 0.0;
    let mut complementary = 0.0;
    let mut compared = 0usize;

    for (rule, va, vb) in trait_pairs(a, b) {
        let (Some(va), Some(vb)) = (va, vb) else {
            continue;
        };
        compared += 1;
        match rule {
            TraitRule::Similarity => similarity += rule.contribution(va, vb),
            TraitRule::Complementary | TraitRule::AbsoluteLevel => {
                complementary += rule.contribution(va, vb)
            }
        }
    }

    if compared == 0 {
        return NEUTRAL_SCORE;
    }

    ((similarity * SIMILARITY_SHARE + complementary * COMPLEMENTARY_SHARE) / compared as f64)
        .clamp(0.0, 1.0)
}

fn answered(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Values sub-score (0-1)
///
/// Each field present on both sides adds its weight to the denominator.
/// Exact answers earn the full weight, different answers a partial share.
pub fn values_score(a: Option<&ValuesGoals>, b: Option<&ValuesGoals>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return NEUTRAL_SCORE;
    };

    let fields: [(f64, Option<&str>, Option<&str>, fn(&str, &str) -> f64); 3] = [
        (
            LIFE_GOAL_WEIGHT,
            answered(&a.life_goal),
            answered(&b.life_goal),
            life_goal_affinity,
        ),
        (
            CORE_VALUE_WEIGHT,
            answered(&a.core_value),
            answered(&b.core_value),
            core_value_affinity,
        ),
        (
            FUTURE_VISION_WEIGHT,
            answered(&a.future_vision),
            answered(&b.future_vision),
            future_vision_affinity,
        ),
    ];

    let mut score = 0.0;
    let mut present_weight = 0.0;

    for (weight, va, vb, affinity) in fields {
        let (Some(va), Some(vb)) = (va, vb) else {
            continue;
        };
        present_weight += weight;
        score += if va == vb {
            weight
        } else {
            weight * affinity(va, vb)
        };
    }

    if present_weight == 0.0 {
        return NEUTRAL_SCORE;
    }

    (score / present_weight).clamp(0.0, 1.0)
}

/// Interests sub-score (0-1) and the shared tags, in the order of `a`
///
/// The category part counts categories both profiles touch, out of the
/// categories either profile touches. An empty list on either side is
/// treated as missing data.
pub fn interests_score(a: &[String], b: &[String]) -> (f64, Vec<String>) {
    let a = unique_tags(a);
    let b = unique_tags(b);

    if a.is_empty() || b.is_empty() {
        return (NEUTRAL_SCORE, Vec::new());
    }

    let shared: Vec<String> = a
        .iter()
        .filter(|tag| b.contains(tag))
        .map(|tag| tag.to_string())
        .collect();

    let exact = shared.len() as f64 / a.len().max(b.len()) as f64;

    let mut in_a = [false; INTEREST_CATEGORIES.len()];
    let mut in_b = [false; INTEREST_CATEGORIES.len()];
    for idx in a.iter().filter_map(|tag| interest_category(tag)) {
        in_a[idx] = true;
    }
    for idx in b.iter().filter_map(|tag| interest_category(tag)) {
        in_b[idx] = true;
    }

    let touched = in_a.iter().zip(&in_b).filter(|(x, y)| **x || **y).count();
    let common = in_a.iter().zip(&in_b).filter(|(x, y)| **x && **y).count();

    // Only free-form tags: nothing to say about categories
    let score = if touched == 0 {
        exact
    } else {
        let category = common as f64 / touched as f64;
        exact * EXACT_INTEREST_SHARE + category * CATEGORY_INTEREST_SHARE
    };

    (score.clamp(0.0, 1.0), shared)
}

/// Lifestyle sub-score (0-1)
pub fn lifestyle_score(a: &Lifestyle, b: &Lifestyle) -> f64 {
    let mut total = 0.0;
    let mut compared = 0usize;

    for ((_, va), (_, vb)) in a.factors().into_iter().zip(b.factors()) {
        if let (Some(va), Some(vb)) = (va, vb) {
            total += 1.0 - (va - vb).abs() / 4.0;
            compared += 1;
        }
    }

    if compared == 0 {
        return NEUTRAL_SCORE;
    }

    (total / compared as f64).clamp(0.0, 1.0)
}
