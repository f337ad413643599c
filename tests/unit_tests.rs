// Unit tests for Kindred Algo

use kindred_algo::core::{
    interests_score, lifestyle_score, personality_score, values_score, CompatibilityScorer,
    LegacyScorer, Scorer,
};
use kindred_algo::models::{
    Lifestyle, Objective, PersonalityTraits, Profile, ScoringWeights, ValuesGoals,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const INTERESTS: &[&str] = &[
    "music", "art", "film_series", "reading", "fitness", "running", "hiking", "dance",
    "parties", "board_games", "travel", "languages", "cooking", "yoga", "video_games",
    "photography", "knitting",
];
const LIFE_GOALS: &[&str] = &["family", "career", "travel", "stability", "personal_growth", "impact"];
const CORE_VALUES: &[&str] = &[
    "honesty", "loyalty", "respect", "responsibility", "ambition", "growth", "calm",
    "self_love", "wellbeing", "adventure", "creativity", "curiosity",
];
const VISIONS: &[&str] = &[
    "settled_home", "family_life", "community", "successful_career", "financial_freedom",
    "world_travel", "nomad_life",
];

fn maybe(rng: &mut ChaCha8Rng, low: f64, high: f64) -> Option<f64> {
    if rng.gen_bool(0.8) {
        Some(rng.gen_range(low..=high))
    } else {
        None
    }
}

fn maybe_pick(rng: &mut ChaCha8Rng, options: &[&str]) -> Option<String> {
    if rng.gen_bool(0.75) {
        options.choose(rng).map(|s| s.to_string())
    } else {
        None
    }
}

fn random_profile(rng: &mut ChaCha8Rng, id: usize) -> Profile {
    let interest_count = rng.gen_range(0..6);
    let interests = (0..interest_count)
        .filter_map(|_| INTERESTS.choose(rng).map(|s| s.to_string()))
        .collect();

    Profile {
        id: format!("user-{}", id),
        objective: [Objective::Friendship, Objective::Networking, Objective::Relationship]
            .choose(rng)
            .copied(),
        personality_traits: PersonalityTraits {
            extraversion: maybe(rng, 1.0, 5.0),
            agreeableness: maybe(rng, 1.0, 5.0),
            conscientiousness: maybe(rng, 1.0, 5.0),
            emotional_stability: maybe(rng, 1.0, 5.0),
            openness: maybe(rng, 1.0, 5.0),
        },
        interests,
        values_goals: if rng.gen_bool(0.9) {
            Some(ValuesGoals {
                life_goal: maybe_pick(rng, LIFE_GOALS),
                core_value: maybe_pick(rng, CORE_VALUES),
                future_vision: maybe_pick(rng, VISIONS),
            })
        } else {
            None
        },
        lifestyle: Lifestyle {
            schedule_management: maybe(rng, 1.0, 3.0),
            alcohol_consumption: maybe(rng, 1.0, 3.0),
            social_energy: maybe(rng, 1.0, 3.0),
            life_pace: maybe(rng, 1.0, 3.0),
        },
    }
}

fn random_pairs(seed: u64, count: usize) -> Vec<(Profile, Profile)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| (random_profile(&mut rng, 2 * i), random_profile(&mut rng, 2 * i + 1)))
        .collect()
}

fn scorers() -> Vec<Box<dyn Scorer>> {
    vec![
        Box::new(CompatibilityScorer::default()),
        Box::new(LegacyScorer::new()),
    ]
}

#[test]
fn test_score_is_deterministic_and_in_range() {
    for scorer in scorers() {
        for (a, b) in random_pairs(7, 300) {
            let first = scorer.score(&a, &b).unwrap();
            let second = scorer.score(&a, &b).unwrap();

            assert_eq!(first, second, "{} scorer is not deterministic", scorer.name());
            assert!((0.0..=1.0).contains(&first.overall));
            for (name, value) in first.breakdown.unwrap().components() {
                assert!((0.0..=1.0).contains(&value), "{} out of range: {}", name, value);
            }
        }
    }
}

#[test]
fn test_score_is_symmetric() {
    for scorer in scorers() {
        for (a, b) in random_pairs(42, 300) {
            let ab = scorer.score(&a, &b).unwrap();
            let ba = scorer.score(&b, &a).unwrap();

            assert_eq!(ab.overall, ba.overall, "{} overall differs for {} / {}", scorer.name(), a.id, b.id);
            assert_eq!(ab.breakdown, ba.breakdown);

            let mut shared_ab = ab.shared_interests.clone();
            let mut shared_ba = ba.shared_interests.clone();
            shared_ab.sort();
            shared_ba.sort();
            assert_eq!(shared_ab, shared_ba);
        }
    }
}

#[test]
fn test_shared_interests_subset_without_duplicates() {
    let scorer = CompatibilityScorer::default();
    for (a, b) in random_pairs(99, 300) {
        let result = scorer.score(&a, &b).unwrap();

        for (i, tag) in result.shared_interests.iter().enumerate() {
            assert!(a.interests.contains(tag));
            assert!(b.interests.contains(tag));
            assert!(!result.shared_interests[..i].contains(tag), "duplicate {}", tag);
        }
    }
}

#[test]
fn test_self_score_is_not_forced_to_full() {
    let mut profile = Profile::new("self");
    profile.personality_traits = PersonalityTraits::full(3.0, 3.0, 3.0, 2.0, 3.0);
    profile.lifestyle = Lifestyle {
        schedule_management: Some(2.0),
        life_pace: Some(1.0),
        ..Default::default()
    };

    let result = CompatibilityScorer::default().score(&profile, &profile).unwrap();
    let breakdown = result.breakdown.unwrap();

    // emotionalStability uses the raw level (2 / 5), extraversion difference is 0
    let expected = (3.0 * 0.7 + 0.4 * 0.3) / 5.0;
    assert!((breakdown.personality - expected).abs() < 1e-12);
    assert!((breakdown.lifestyle - 1.0).abs() < 1e-12);
    assert!(result.overall < 1.0);
}

#[test]
fn test_big_five_scenario() {
    let make = |id: &str| Profile {
        id: id.to_string(),
        personality_traits: PersonalityTraits::full(4.0, 3.0, 2.0, 3.0, 4.0),
        interests: vec!["music".to_string(), "art".to_string()],
        ..Profile::default()
    };
    let current = make("current");
    let candidate = make("candidate");

    let result = CompatibilityScorer::default().score(&current, &candidate).unwrap();
    let breakdown: kindred_algo::Breakdown = result.breakdown.unwrap().into();

    assert_eq!(breakdown.interests, 100);
    assert_eq!(breakdown.personality, 46);
    assert_eq!(breakdown.values, 50);
    assert_eq!(breakdown.lifestyle, 50);
    assert_eq!(kindred_algo::models::to_percent(result.overall), 61);
}

#[test]
fn test_personality_rules_per_trait() {
    let a = PersonalityTraits {
        extraversion: Some(1.0),
        ..Default::default()
    };
    let b = PersonalityTraits {
        extraversion: Some(4.0),
        ..Default::default()
    };
    // difference capped at 2 -> full complementary contribution, weighted 0.3
    assert!((personality_score(&a, &b) - 0.3).abs() < 1e-12);

    let a = PersonalityTraits {
        openness: Some(1.0),
        ..Default::default()
    };
    let b = PersonalityTraits {
        openness: Some(3.0),
        ..Default::default()
    };
    assert!((personality_score(&a, &b) - 0.5 * 0.7).abs() < 1e-12);
}

#[test]
fn test_values_with_only_one_side_answered() {
    let answered = ValuesGoals {
        life_goal: Some("career".to_string()),
        core_value: Some("ambition".to_string()),
        future_vision: None,
    };
    let other = ValuesGoals {
        future_vision: Some("nomad_life".to_string()),
        ..Default::default()
    };
    assert_eq!(values_score(Some(&answered), Some(&other)), 0.5);
}

#[test]
fn test_interests_disjoint_categories_score_zero() {
    let a = vec!["music".to_string()];
    let b = vec!["hiking".to_string()];
    let (score, shared) = interests_score(&a, &b);
    assert_eq!(score, 0.0);
    assert!(shared.is_empty());
}

#[test]
fn test_lifestyle_maximum_gap() {
    let a = Lifestyle {
        alcohol_consumption: Some(1.0),
        ..Default::default()
    };
    let b = Lifestyle {
        alcohol_consumption: Some(3.0),
        ..Default::default()
    };
    assert_eq!(lifestyle_score(&a, &b), 0.5);
}

#[test]
fn test_strategies_disagree() {
    let mut a = Profile::new("a");
    a.personality_traits = PersonalityTraits::full(1.0, 4.0, 4.0, 5.0, 2.0);
    a.interests = vec!["music".to_string(), "travel".to_string()];
    let mut b = Profile::new("b");
    b.personality_traits = PersonalityTraits::full(3.0, 4.0, 3.0, 5.0, 2.0);
    b.interests = vec!["art".to_string(), "travel".to_string()];

    let canonical = CompatibilityScorer::new(ScoringWeights::default()).score(&a, &b).unwrap();
    let legacy = LegacyScorer::new().score(&a, &b).unwrap();

    assert_ne!(canonical.overall, legacy.overall);
}
