//! Service configuration
//!
//! Loads settings from a TOML file; every field has a default, so an empty
//! file (or none at all) yields a working local setup. The chat-platform
//! token is read from the environment, not the file, and is required by the
//! transport process before it starts handling events.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the chat-platform token.
///
/// The token is used solely by the gateway to authenticate to the platform;
/// the ledger core never reads it. Its absence is a startup-abort condition
/// for the embedding process.
pub const TOKEN_ENV: &str = "LINKLEDGER_BOT_TOKEN";

/// Service configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the config TOML
    #[error("failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field holds a value the service cannot run with
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The platform token environment variable is absent or empty
    #[error("missing chat-platform token: set {TOKEN_ENV}")]
    MissingToken,
}

/// Service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backing file for the pending queue
    #[serde(default = "default_queue_path")]
    pub queue_path: PathBuf,

    /// Backing file for the contributor counters
    #[serde(default = "default_counters_path")]
    pub counters_path: PathBuf,

    /// Batch size shown in progress replies ("{pending}/{batch_size}")
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Queue-length interval between progress notifications
    #[serde(default = "default_milestone_interval")]
    pub milestone_interval: usize,

    /// Number of leaderboard rows in the statistics reply
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

fn default_queue_path() -> PathBuf {
    PathBuf::from("pending_urls.json")
}

fn default_counters_path() -> PathBuf {
    PathBuf::from("url_counts.json")
}

fn default_batch_size() -> usize {
    30
}

fn default_milestone_interval() -> usize {
    10
}

fn default_leaderboard_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_path: default_queue_path(),
            counters_path: default_counters_path(),
            batch_size: default_batch_size(),
            milestone_interval: default_milestone_interval(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the chat-platform token from the environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingToken`] when the variable is unset or empty.
    pub fn bot_token() -> Result<String, ConfigError> {
        match std::env::var(TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::MissingToken),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.milestone_interval == 0 {
            return Err(ConfigError::Invalid(
                "milestone_interval must be at least 1".to_string(),
            ));
        }
        if self.queue_path == self.counters_path {
            return Err(ConfigError::Invalid(
                "queue_path and counters_path must differ".to_string(),
            ));
        }
        Ok(())
    }
}
