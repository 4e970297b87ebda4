use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ScoringConfig, DEFAULT_FAVORITE_BOOST, DEFAULT_TOKEN_DELIMITER};
use crate::services::DEFAULT_WRITE_BATCH_SIZE;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_favorite_boost")]
    pub favorite_boost: f64,
    #[serde(default = "default_token_delimiter")]
    pub token_delimiter: String,
    #[serde(default = "default_write_batch_size")]
    pub write_batch_size: usize,
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            favorite_boost: default_favorite_boost(),
            token_delimiter: default_token_delimiter(),
            write_batch_size: default_write_batch_size(),
            max_participants: default_max_participants(),
        }
    }
}

impl MatchingSettings {
    pub fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            favorite_boost: self.favorite_boost,
            token_delimiter: self.token_delimiter.clone(),
        }
    }
}

fn default_favorite_boost() -> f64 { DEFAULT_FAVORITE_BOOST }
fn default_token_delimiter() -> String { DEFAULT_TOKEN_DELIMITER.to_string() }
fn default_write_batch_size() -> usize { DEFAULT_WRITE_BATCH_SIZE }
fn default_max_participants() -> usize { 5000 }

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
    /// 4. Environment variables (prefixed with MENTOR_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR_MATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the matching pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let matching = &self.matching;

        if !matching.favorite_boost.is_finite() || matching.favorite_boost < 1.0 {
            return Err(ConfigError::Message(format!(
                "matching.favorite_boost must be at least 1, got {}",
                matching.favorite_boost
            )));
        }
        if matching.token_delimiter.is_empty() {
            return Err(ConfigError::Message("matching.token_delimiter must not be empty".to_string()));
        }
        if matching.write_batch_size == 0 {
            return Err(ConfigError::Message("matching.write_batch_size must be positive".to_string()));
        }
        if matching.max_participants == 0 {
            return Err(ConfigError::Message("matching.max_participants must be positive".to_string()));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
