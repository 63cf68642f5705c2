//! Barrier configuration.
//!
//! Configuration only supplies defaults; deadlines themselves are always
//! computed at the moment a round starts.

use crate::deadline::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`SyncConfig::default_timeout_ms`].
pub const ENV_TIMEOUT_MS: &str = "FANIN_TIMEOUT_MS";
/// Environment variable overriding [`SyncConfig::log_late_completions`].
pub const ENV_LOG_LATE: &str = "FANIN_LOG_LATE";

/// Errors raised while loading a [`SyncConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// An environment variable held a value of the wrong shape.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A timeout of zero would time out every non-empty round.
    #[error("default timeout must be greater than zero")]
    ZeroTimeout,
}

/// Defaults applied by [`FanIn`](crate::FanIn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Per-round timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Emit a trace event for each completion that arrives after its round
    /// timed out.
    pub log_late_completions: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            log_late_completions: true,
        }
    }
}

impl SyncConfig {
    /// The per-round timeout as a `Duration`.
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `FANIN_TIMEOUT_MS` and `FANIN_LOG_LATE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_env(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `lookup`, which maps variable names to values.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            self.default_timeout_ms =
                raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup(ENV_LOG_LATE) {
            self.log_late_completions = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                var: ENV_LOG_LATE,
                value: raw.clone(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects settings no round could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
