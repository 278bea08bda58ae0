use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::username::{
    UsernamePolicy, FINGERPRINT_MIN_LENGTH, MAX_COMBINING_DIACRITICS, USERNAME_MAX_LENGTH,
    USERNAME_MIN_LENGTH,
};
use crate::infrastructure::observability::MetricsConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub username: UsernameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where claimed usernames are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Username rules and the sources for the default oracles
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_fingerprint_min_length")]
    pub fingerprint_min_length: usize,
    #[serde(default = "default_max_combining_diacritics")]
    pub max_combining_diacritics: usize,
    /// Word list merged into the built-in one
    #[serde(default)]
    pub prohibited_words_path: Option<PathBuf>,
    #[serde(default)]
    pub extra_prohibited_words: Vec<String>,
    /// Single character look-alike -> single character prototype
    #[serde(default)]
    pub extra_confusables: HashMap<String, String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost/nameguard".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_min_length() -> usize {
    USERNAME_MIN_LENGTH
}

fn default_max_length() -> usize {
    USERNAME_MAX_LENGTH
}

fn default_fingerprint_min_length() -> usize {
    FINGERPRINT_MIN_LENGTH
}

fn default_max_combining_diacritics() -> usize {
    MAX_COMBINING_DIACRITICS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for UsernameConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            fingerprint_min_length: default_fingerprint_min_length(),
            max_combining_diacritics: default_max_combining_diacritics(),
            prohibited_words_path: None,
            extra_prohibited_words: Vec::new(),
            extra_confusables: HashMap::new(),
        }
    }
}

impl UsernameConfig {
    pub fn policy(&self) -> UsernamePolicy {
        UsernamePolicy {
            min_length: self.min_length,
            max_length: self.max_length,
            fingerprint_min_length: self.fingerprint_min_length,
            max_combining_diacritics: self.max_combining_diacritics,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("NAMEGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
