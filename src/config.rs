use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::FilterThresholds;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub likes: LikesSettings,
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
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_pets_table")]
    pub pets_table: String,
    #[serde(default = "default_responses_table")]
    pub responses_table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_pets_table() -> String { "Pets".to_string() }
fn default_responses_table() -> String { "adopter_response".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_energy_low")]
    pub energy_low: i32,
    #[serde(default = "default_energy_high")]
    pub energy_high: i32,
    #[serde(default = "default_pets_friendly_min")]
    pub pets_friendly_min: i32,
    #[serde(default = "default_pets_need_time_min")]
    pub pets_need_time_min: i32,
    #[serde(default = "default_care_novice_max")]
    pub care_novice_max: i32,
    #[serde(default = "default_care_experienced_max")]
    pub care_experienced_max: i32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            energy_low: default_energy_low(),
            energy_high: default_energy_high(),
            pets_friendly_min: default_pets_friendly_min(),
            pets_need_time_min: default_pets_need_time_min(),
            care_novice_max: default_care_novice_max(),
            care_experienced_max: default_care_experienced_max(),
        }
    }
}

fn default_energy_low() -> i32 { 2 }
fn default_energy_high() -> i32 { 3 }
fn default_pets_friendly_min() -> i32 { 2 }
fn default_pets_need_time_min() -> i32 { 3 }
fn default_care_novice_max() -> i32 { 1 }
fn default_care_experienced_max() -> i32 { 2 }

impl From<&ThresholdsConfig> for FilterThresholds {
    fn from(config: &ThresholdsConfig) -> Self {
        Self {
            energy_low: config.energy_low,
            energy_high: config.energy_high,
            pets_friendly_min: config.pets_friendly_min,
            pets_need_time_min: config.pets_need_time_min,
            care_novice_max: config.care_novice_max,
            care_experienced_max: config.care_experienced_max,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_ttl() -> u64 { 3600 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LikesSettings {
    #[serde(default = "default_likes_dir")]
    pub data_dir: String,
}

impl Default for LikesSettings {
    fn default() -> Self {
        Self { data_dir: default_likes_dir() }
    }
}

fn default_likes_dir() -> String { "data/likes".to_string() }

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
    /// 3. Environment variables (prefixed with PAWDR_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAWDR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PAWDR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PAWDR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Match thresholds, rejecting an energy band no pet could fall into
    pub fn thresholds(&self) -> Result<FilterThresholds, ConfigError> {
        let thresholds = FilterThresholds::from(&self.matching.thresholds);

        if thresholds.energy_low > thresholds.energy_high {
            return Err(ConfigError::Message(format!(
                "matching.thresholds.energy_low ({}) must not exceed energy_high ({})",
                thresholds.energy_low, thresholds.energy_high
            )));
        }

        Ok(thresholds)
    }
}

/// Apply the conventional Supabase environment variables on top of the config
///
/// `SUPABASE_URL` and `SUPABASE_ANON_KEY` win over file values so the same
/// file works across projects.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Ok(api_key) = env::var("SUPABASE_ANON_KEY") {
        builder = builder.set_override("supabase.api_key", api_key)?;
    }

    builder.build()
}
