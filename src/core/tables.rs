//! Fixed lookup tables used by the compatibility scorer.
//!
//! These encode product decisions about which answers go well together.
//! They are constants on purpose and are not read from configuration.

/// Neutral sub-score when nothing can be compared
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Interest vocabulary grouped by category
pub const INTEREST_CATEGORIES: [(&str, &[&str]); 6] = [
    ("creativity", &["music", "art", "film_series", "reading"]),
    ("sport", &["fitness", "running", "hiking", "dance"]),
    ("social", &["parties", "board_games", "volunteering", "concerts"]),
    ("discovery", &["travel", "languages", "science", "history"]),
    ("wellbeing", &["cooking", "gastronomy", "yoga", "meditation"]),
    ("digital", &["video_games", "technology", "photography", "podcasts"]),
];

/// Life goal pairs and their partial credit. One entry per unordered pair;
/// [`life_goal_affinity`] looks up both orders.
const LIFE_GOAL_MATRIX: [((&str, &str), f64); 10] = [
    (("family", "stability"), 0.40),
    (("career", "personal_growth"), 0.35),
    (("impact", "personal_growth"), 0.35),
    (("travel", "personal_growth"), 0.30),
    (("career", "stability"), 0.25),
    (("impact", "career"), 0.25),
    (("travel", "career"), 0.20),
    (("family", "career"), 0.15),
    (("travel", "family"), 0.05),
    (("stability", "travel"), 0.05),
];

/// Credit for a life goal pair missing from the matrix
pub const LIFE_GOAL_DEFAULT: f64 = 0.10;

const CORE_VALUE_GROUPS: [&[&str]; 4] = [
    &["honesty", "loyalty", "respect"],
    &["responsibility", "ambition", "growth"],
    &["calm", "self_love", "wellbeing"],
    &["adventure", "creativity", "curiosity"],
];

/// Core value groups that overlap in spirit
const CORE_VALUE_ADJACENT: [(usize, usize); 3] = [(0, 2), (1, 3), (1, 2)];

pub const CORE_VALUE_SAME_GROUP: f64 = 0.25;
pub const CORE_VALUE_ADJACENT_GROUP: f64 = 0.15;
pub const CORE_VALUE_UNRELATED: f64 = 0.10;

const FUTURE_VISION_GROUPS: [&[&str]; 3] = [
    &["settled_home", "family_life", "community"],
    &["successful_career", "financial_freedom", "entrepreneurship"],
    &["world_travel", "nomad_life", "creative_freedom"],
];

pub const FUTURE_VISION_SAME_GROUP: f64 = 0.15;
pub const FUTURE_VISION_UNRELATED: f64 = 0.08;

/// Category index of an interest tag, `None` for tags outside the vocabulary
pub fn interest_category(tag: &str) -> Option<usize> {
    INTEREST_CATEGORIES
        .iter()
        .position(|(_, tags)| tags.contains(&tag))
}

/// Partial credit for two different life goals
pub fn life_goal_affinity(a: &str, b: &str) -> f64 {
    LIFE_GOAL_MATRIX
        .iter()
        .find(|((x, y), _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, score)| *score)
        .unwrap_or(LIFE_GOAL_DEFAULT)
}

pub fn core_value_group(value: &str) -> Option<usize> {
    CORE_VALUE_GROUPS.iter().position(|group| group.contains(&value))
}

pub fn core_value_groups_adjacent(a: usize, b: usize) -> bool {
    CORE_VALUE_ADJACENT
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Partial credit for two different core values
pub fn core_value_affinity(a: &str, b: &str) -> f64 {
    match (core_value_group(a), core_value_group(b)) {
        (Some(ga), Some(gb)) if ga == gb => CORE_VALUE_SAME_GROUP,
        (Some(ga), Some(gb)) if core_value_groups_adjacent(ga, gb) => CORE_VALUE_ADJACENT_GROUP,
        _ => CORE_VALUE_UNRELATED,
    }
}

pub fn future_vision_group(value: &str) -> Option<usize> {
    FUTURE_VISION_GROUPS
        .iter()
        .position(|group| group.contains(&value))
}

/// Partial credit for two different visions of the future
pub fn future_vision_affinity(a: &str, b: &str) -> f64 {
    match (future_vision_group(a), future_vision_group(b)) {
        (Some(ga), Some(gb)) if ga == gb => FUTURE_VISION_SAME_GROUP,
        _ => FUTURE_VISION_UNRELATED,
    }
}
