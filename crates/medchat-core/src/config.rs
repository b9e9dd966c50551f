use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root of `config.toml`.
///
/// Every field has a default so an empty or partial file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the chat service, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Language the server writes in; no translation is requested for it
    pub base_language: String,
    pub login_path: String,
    /// Page the login flow returns to
    pub return_path: String,
    pub request_timeout_secs: u64,
    /// Pause between two revealed status updates
    pub status_update_delay_ms: u64,
    pub max_suggestions: usize,
    pub translation: TranslationConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            base_language: "en".to_string(),
            login_path: "/login/".to_string(),
            return_path: "/patient/chat/".to_string(),
            request_timeout_secs: 30,
            status_update_delay_ms: 50,
            max_suggestions: 4,
            translation: TranslationConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn status_update_delay(&self) -> Duration {
        Duration::from_millis(self.status_update_delay_ms)
    }

    /// Rejects values the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.translation.poll_interval_ms == 0 {
            return Err(ChatError::config("translation.poll_interval_ms must be greater than 0"));
        }
        if self.translation.poll_interval_ms > self.translation.timeout_ms {
            return Err(ChatError::config(
                "translation.poll_interval_ms must not exceed translation.timeout_ms",
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TranslationConfig {
    /// Give up on an async job after this long
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            poll_interval_ms: 500,
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
