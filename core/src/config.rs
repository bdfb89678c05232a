//! Client configuration.
//!
//! Loaded from an optional TOML file, then overridden by `AERODESK_*`
//! environment variables.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "AERODESK_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "AERODESK_TIMEOUT_MS";
pub const ENV_PROJECT_ID: &str = "AERODESK_PROJECT_ID";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default request timeout; binary proxy downloads use their own.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Analytics project the startup sequence registers with.
    #[serde(default)]
    pub analytics_project_id: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            analytics_project_id: None,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read `path` if it exists, fall back to defaults otherwise, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_TIMEOUT_MS,
                value: raw.clone(),
            })?;
        }
        if let Some(id) = lookup(ENV_PROJECT_ID) {
            self.analytics_project_id = Some(id);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
