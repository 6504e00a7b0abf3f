//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::{ClientConfig, DEFAULT_API_BASE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// New-event polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_polling_enabled")]
    pub enabled: bool,

    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

fn default_polling_enabled() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    3600 // 1 hour
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: default_polling_enabled(),
            interval_secs: default_poll_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        if config.polling.interval_secs == 0 {
            tracing::warn!(
                "Ignoring polling.interval_secs = 0 in {:?}, using {}",
                path,
                default_poll_interval()
            );
            config.polling.interval_secs = default_poll_interval();
        }

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("agenda").join("config.toml")),
            Some(PathBuf::from("/etc/agenda/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `AGENDA_*` overrides read through `lookup`
    ///
    /// Values that fail to parse are ignored, as is a zero poll interval.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = lookup("AGENDA_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("AGENDA_REQUEST_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        // Polling overrides
        if let Some(interval) = lookup("AGENDA_POLL_INTERVAL_SECS") {
            match interval.parse::<u64>() {
                Ok(0) | Err(_) => {}
                Ok(i) => self.polling.interval_secs = i,
            }
        }
        if let Some(enabled) = lookup("AGENDA_POLL_ENABLED") {
            if let Ok(e) = enabled.parse() {
                self.polling.enabled = e;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("AGENDA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("AGENDA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Agenda Dashboard Configuration
#
# Environment variables override these settings:
# - AGENDA_API_URL
# - AGENDA_REQUEST_TIMEOUT_SECS
# - AGENDA_POLL_INTERVAL_SECS
# - AGENDA_POLL_ENABLED
# - AGENDA_LOG_LEVEL
# - AGENDA_LOG_FORMAT

[api]
# Base URL of the agenda REST backend
base_url = "http://localhost:5000/api"

# Request timeout in seconds
request_timeout_secs = 30

[polling]
# Check the backend for new events in the background
enabled = true

# How often to check for new events (seconds)
interval_secs = 3600

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/agenda/agenda.log"
"#
    .to_string()
}
