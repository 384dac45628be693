use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
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
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub user_profiles: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis is optional; without it only the in-process cache is used
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// Number of profiles fetched from Appwrite before filtering and ranking
    #[serde(default = "default_candidate_pool_size")]
    pub candidate_pool_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            candidate_pool_size: default_candidate_pool_size(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_candidate_pool_size() -> usize { 200 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_country_weight")]
    pub country: u32,
    #[serde(default = "default_state_weight")]
    pub state: u32,
    #[serde(default = "default_city_weight")]
    pub city: u32,
    #[serde(default = "default_university_weight")]
    pub university: u32,
    #[serde(default = "default_study_field_weight")]
    pub study_field: u32,
    #[serde(default = "default_tag_weight")]
    pub per_interest: u32,
    #[serde(default = "default_tag_weight")]
    pub per_goal: u32,
    #[serde(default = "default_max_score")]
    pub max_score: u8,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            country: default_country_weight(),
            state: default_state_weight(),
            city: default_city_weight(),
            university: default_university_weight(),
            study_field: default_study_field_weight(),
            per_interest: default_tag_weight(),
            per_goal: default_tag_weight(),
            max_score: default_max_score(),
        }
    }
}

fn default_country_weight() -> u32 { 30 }
fn default_state_weight() -> u32 { 20 }
fn default_city_weight() -> u32 { 15 }
fn default_university_weight() -> u32 { 25 }
fn default_study_field_weight() -> u32 { 20 }
fn default_tag_weight() -> u32 { 5 }
fn default_max_score() -> u8 { 100 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            country: config.country,
            state: config.state,
            city: config.city,
            university: config.university,
            study_field: config.study_field,
            per_interest: config.per_interest,
            per_goal: config.per_goal,
            max_score: config.max_score,
        }
    }
}

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
    /// 4. Environment variables (prefixed with NSA__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NSA__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NSA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply well-known unprefixed variables (DATABASE_URL, REDIS_URL, Appwrite credentials)
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("database.url", "DATABASE_URL"),
        ("cache.redis_url", "REDIS_URL"),
        ("appwrite.endpoint", "APPWRITE_ENDPOINT"),
        ("appwrite.api_key", "APPWRITE_API_KEY"),
        ("appwrite.project_id", "APPWRITE_PROJECT_ID"),
        ("appwrite.database_id", "APPWRITE_DATABASE_ID"),
    ];

    let mut builder = Config::builder().add_source(settings);

    for (key, var) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights_match_scoring_table() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("nsa-match-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[appwrite]
endpoint = "http://localhost/v1"
api_key = "key"
project_id = "project"
database_id = "db"

[collection]
user_profiles = "users"

[database]
url = "postgres://localhost/test"

[scoring.weights]
university = 40
"#
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.matching.max_limit, 100);
        assert!(settings.cache.redis_url.is_none());
        let weights = settings.scoring_weights();
        assert_eq!(weights.university, 40);
        assert_eq!(weights.country, 30);

        std::fs::remove_dir_all(&dir).ok();
    }
}
