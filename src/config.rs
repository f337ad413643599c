use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::ranker::{DEFAULT_MIN_SCORE, DEFAULT_PARALLEL_THRESHOLD};
use crate::core::{RankerConfig, ScoringStrategy};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub compatibility_profiles: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: Option<u64>,
    pub max_entries: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub min_score: Option<u8>,
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
    pub candidate_pool_size: Option<usize>,
    pub parallel_threshold: Option<usize>,
}

impl MatchingSettings {
    pub fn ranker_config(&self) -> RankerConfig {
        RankerConfig {
            min_score: self.min_score.unwrap_or(DEFAULT_MIN_SCORE),
            parallel_threshold: self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        }
    }

    pub fn default_limit(&self) -> i64 {
        i64::from(self.default_limit.unwrap_or(20))
    }

    pub fn max_limit(&self) -> i64 {
        i64::from(self.max_limit.unwrap_or(100))
    }

    pub fn candidate_pool_size(&self) -> usize {
        self.candidate_pool_size.unwrap_or(500)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub strategy: ScoringStrategy,
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_personality_weight")]
    pub personality: f64,
    #[serde(default = "default_values_weight")]
    pub values: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            personality: default_personality_weight(),
            values: default_values_weight(),
            interests: default_interests_weight(),
            lifestyle: default_lifestyle_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            personality: config.personality,
            values: config.values,
            interests: config.interests,
            lifestyle: config.lifestyle,
        }
    }
}

fn default_personality_weight() -> f64 { 0.35 }
fn default_values_weight() -> f64 { 0.30 }
fn default_interests_weight() -> f64 { 0.25 }
fn default_lifestyle_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KINDRED__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KINDRED__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("KINDRED")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the plain Appwrite variables used by the deployment scripts
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("APPWRITE_ENDPOINT", "appwrite.endpoint"),
        ("APPWRITE_API_KEY", "appwrite.api_key"),
        ("APPWRITE_PROJECT_ID", "appwrite.project_id"),
        ("APPWRITE_DATABASE_ID", "appwrite.database_id"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
