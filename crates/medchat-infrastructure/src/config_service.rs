//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/medchat/config.toml`
//! and applies environment overrides on top.

use crate::paths::MedchatPaths;
use medchat_core::config::ClientConfig;
use medchat_core::error::{ChatError, Result};
use std::fs;
use std::path::PathBuf;

pub const ENV_BASE_URL: &str = "MEDCHAT_BASE_URL";
pub const ENV_BASE_LANGUAGE: &str = "MEDCHAT_BASE_LANGUAGE";

/// Configuration service reading a single TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a ConfigService for the default config path.
    pub fn new() -> Result<Self> {
        let path = MedchatPaths::config_file().map_err(|e| ChatError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a ConfigService with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the configuration file.
    ///
    /// A missing or empty file yields the defaults; a malformed or invalid
    /// one is an error.
    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file and applies the process environment on top.
    pub fn load_with_env(&self) -> Result<ClientConfig> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }
}

/// Overrides file values with the `MEDCHAT_*` variables returned by `lookup`.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url;
    }
    if let Some(language) = lookup(ENV_BASE_LANGUAGE).filter(|v| !v.trim().is_empty()) {
        config.base_language = language;
    }
}
