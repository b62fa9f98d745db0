//! TOML configuration for the poller and the `tgpoll` binary.

mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::entities::UpdateKind;
use crate::error::ConfigError;
use defaults::*;

/// Environment variable that overrides `bot.token`.
pub const TOKEN_ENV: &str = "TGPOLL_BOT_TOKEN";

/// Largest batch the service will return per poll.
pub const MAX_BATCH_LIMIT: u32 = 100;

/// Longest long-poll wait accepted from config, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub log: LogSettings,
}

/// Bot credentials and API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
        }
    }
}

/// When the poller acknowledges delivered updates by advancing its offset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckMode {
    /// After the whole batch has been handed to the consumer.
    #[default]
    Batch,
    /// After each update has been handed to the consumer.
    PerUpdate,
}

/// What the poller does with a batch that fails to decode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Log, back off, and poll the same offset again.
    #[default]
    Retry,
    /// Stop the poller and surface the error.
    Stop,
}

/// Long-polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSettings {
    /// Long-poll timeout sent to the service.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// First backoff delay after a failure.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
    /// Ceiling for the backoff delay.
    #[serde(default = "default_backoff_max_secs")]
    pub backoff_max_secs: u64,
    #[serde(default = "default_batch_limit")]
    pub batch_limit: u32,
    /// Update kinds to receive. Empty = whatever the service sends by default.
    #[serde(default)]
    pub allowed_updates: Vec<UpdateKind>,
    #[serde(default)]
    pub ack_mode: AckMode,
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_secs: default_backoff_max_secs(),
            batch_limit: default_batch_limit(),
            allowed_updates: Vec::new(),
            ack_mode: AckMode::default(),
            decode_policy: DecodePolicy::default(),
        }
    }
}

impl PollingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    pub fn backoff_max(&self) -> Duration {
        Duration::from_secs(self.backoff_max_secs)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Parse a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Take the bot token from `TGPOLL_BOT_TOKEN` when it is set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.bot.token = token.trim().to_string();
            }
        }
    }

    /// Reject settings the poller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.token.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "bot.token is empty. Set it in the config file or the {TOKEN_ENV} env var."
            )));
        }
        if self.bot.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid("bot.api_base is empty".into()));
        }
        let p = &self.polling;
        if p.timeout_secs == 0 || p.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "polling.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                p.timeout_secs
            )));
        }
        if p.batch_limit == 0 || p.batch_limit > MAX_BATCH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "polling.batch_limit must be between 1 and {MAX_BATCH_LIMIT}, got {}",
                p.batch_limit
            )));
        }
        if p.backoff_base_ms == 0 {
            return Err(ConfigError::Invalid(
                "polling.backoff_base_ms must be at least 1".into(),
            ));
        }
        if p.backoff_base() > p.backoff_max() {
            return Err(ConfigError::Invalid(format!(
                "polling.backoff_base_ms ({}) exceeds polling.backoff_max_secs ({})",
                p.backoff_base_ms, p.backoff_max_secs
            )));
        }
        Ok(())
    }
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    /// The file was missing.
    Defaults,
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. The token env
/// override is applied either way; validation is left to the caller.
pub fn load(path: &str) -> Result<(Config, ConfigOrigin), ConfigError> {
    let path = Path::new(path);
    let (mut config, origin) = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        (Config::from_toml(&content)?, ConfigOrigin::File)
    } else {
        (Config::default(), ConfigOrigin::Defaults)
    };
    config.apply_env();
    Ok((config, origin))
}
