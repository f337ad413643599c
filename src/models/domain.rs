use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// What a user is looking for on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Friendship,
    Networking,
    Relationship,
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Friendship => "friendship",
            Objective::Networking => "networking",
            Objective::Relationship => "relationship",
        }
    }
}

/// Big Five answers on a 1-5 scale. Missing answers stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTraits {
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(default)]
    pub extraversion: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(default)]
    pub agreeableness: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(default)]
    pub conscientiousness: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(default)]
    pub emotional_stability: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(default)]
    pub openness: Option<f64>,
}

impl PersonalityTraits {
    /// Builds a record with every trait answered
    pub fn full(
        extraversion: f64,
        agreeableness: f64,
        conscientiousness: f64,
        emotional_stability: f64,
        openness: f64,
    ) -> Self {
        Self {
            extraversion: Some(extraversion),
            agreeableness: Some(agreeableness),
            conscientiousness: Some(conscientiousness),
            emotional_stability: Some(emotional_stability),
            openness: Some(openness),
        }
    }

    /// Answers in canonical order
    pub fn values(&self) -> [Option<f64>; 5] {
        [
            self.extraversion,
            self.agreeableness,
            self.conscientiousness,
            self.emotional_stability,
            self.openness,
        ]
    }
}

/// Life goal, core value and vision of the future answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesGoals {
    #[serde(default)]
    pub life_goal: Option<String>,
    #[serde(default)]
    pub core_value: Option<String>,
    #[serde(default)]
    pub future_vision: Option<String>,
}

/// Lifestyle answers on a 1-3 scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    #[validate(range(min = 1.0, max = 3.0))]
    #[serde(default)]
    pub schedule_management: Option<f64>,
    #[validate(range(min = 1.0, max = 3.0))]
    #[serde(default)]
    pub alcohol_consumption: Option<f64>,
    #[validate(range(min = 1.0, max = 3.0))]
    #[serde(default)]
    pub social_energy: Option<f64>,
    #[validate(range(min = 1.0, max = 3.0))]
    #[serde(default)]
    pub life_pace: Option<f64>,
}

impl Lifestyle {
    /// Factor values in canonical order, paired with their names
    pub fn factors(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("scheduleManagement", self.schedule_management),
            ("alcoholConsumption", self.alcohol_consumption),
            ("socialEnergy", self.social_energy),
            ("lifePace", self.life_pace),
        ]
    }
}

/// A user's completed compatibility questionnaire
///
/// Every field but `id` is optional on the wire. A blank `id` or an answer
/// outside its scale deserializes fine and is caught by [`Validate`], so one
/// broken document never fails a whole candidate batch at decode time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(default, alias = "userId")]
    pub id: String,
    #[serde(default)]
    pub objective: Option<Objective>,
    #[validate(nested)]
    #[serde(default)]
    pub personality_traits: PersonalityTraits,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub values_goals: Option<ValuesGoals>,
    #[validate(nested)]
    #[serde(default)]
    pub lifestyle: Lifestyle,
}

impl Profile {
    /// Minimal profile with only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Interest tags as compared by every scorer, see [`unique_tags`]
    pub fn unique_interests(&self) -> Vec<&str> {
        unique_tags(&self.interests)
    }
}

/// Trimmed, non-empty tags with duplicates removed, first occurrence wins
pub fn unique_tags(tags: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Identifiers must contain something besides whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Scorer output on the [0, 1] scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub personality: f64,
    pub values: f64,
    pub interests: f64,
    pub lifestyle: f64,
}

impl SubScores {
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("personality", self.personality),
            ("values", self.values),
            ("interests", self.interests),
            ("lifestyle", self.lifestyle),
        ]
    }
}

/// Result of comparing two profiles
///
/// `breakdown == None` with `overall == 0.0` is the "not comparable" sentinel,
/// not a worst-possible match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    pub overall: f64,
    pub breakdown: Option<SubScores>,
    pub shared_interests: Vec<String>,
}

impl Compatibility {
    pub fn neutral_zero() -> Self {
        Self {
            overall: 0.0,
            breakdown: None,
            shared_interests: Vec::new(),
        }
    }

    pub fn is_comparable(&self) -> bool {
        self.breakdown.is_some()
    }
}

/// Per-factor percentages shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub personality: u8,
    pub values: u8,
    pub interests: u8,
    pub lifestyle: u8,
}

impl From<SubScores> for Breakdown {
    fn from(scores: SubScores) -> Self {
        Self {
            personality: to_percent(scores.personality),
            values: to_percent(scores.values),
            interests: to_percent(scores.interests),
            lifestyle: to_percent(scores.lifestyle),
        }
    }
}

/// Scale a [0, 1] value to an integer percentage
#[inline]
pub fn to_percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub candidate_id: String,
    pub overall_score: u8,
    pub breakdown: Breakdown,
    pub shared_interests: Vec<String>,
    pub objective: Option<Objective>,
}

impl MatchResult {
    /// Returns `None` for the not-comparable sentinel
    pub fn from_compatibility(candidate: &Profile, compatibility: Compatibility) -> Option<Self> {
        let breakdown = compatibility.breakdown?;
        Some(Self {
            candidate_id: candidate.id.clone(),
            overall_score: to_percent(compatibility.overall),
            breakdown: breakdown.into(),
            shared_interests: compatibility.shared_interests,
            objective: candidate.objective,
        })
    }
}

/// Why a candidate was left out of scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidProfile,
    ScoringError,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::InvalidProfile => write!(f, "invalid_profile"),
            SkipReason::ScoringError => write!(f, "scoring_error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedCandidate {
    pub candidate_id: Option<String>,
    pub reason: SkipReason,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub personality: f64,
    pub values: f64,
    pub interests: f64,
    pub lifestyle: f64,
}

impl ScoringWeights {
    /// Weights of the older personality/values/hobbies/lifestyle formula
    pub fn legacy() -> Self {
        Self {
            personality: 0.40,
            values: 0.30,
            interests: 0.20,
            lifestyle: 0.10,
        }
    }

    pub fn sum(&self) -> f64 {
        self.personality + self.values + self.interests + self.lifestyle
    }

    /// Weighted average of the four sub-scores, clamped to [0, 1]
    pub fn combine(&self, scores: &SubScores) -> f64 {
        let total = self.sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted = scores.personality * self.personality
            + scores.values * self.values
            + scores.interests * self.interests
            + scores.lifestyle * self.lifestyle;
        (weighted / total).clamp(0.0, 1.0)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            personality: 0.35,
            values: 0.30,
            interests: 0.25,
            lifestyle: 0.10,
        }
    }
}
