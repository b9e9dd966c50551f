//! TranslationService - on-demand localization of assistant text.
//!
//! The server answers a translate call either from its cache (200) or by
//! queueing a job (202) that is polled until it completes, fails or the
//! client gives up. Every failure path yields the source text, so callers
//! can always render something.

use futures::future::join_all;
use medchat_core::api::ChatApi;
use medchat_core::config::ClientConfig;
use medchat_core::error::Result;
use medchat_core::translation::{JobStatus, PollResponse, TranslateResponse};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Polling behavior and the language that needs no translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOptions {
    pub base_language: String,
    /// Give up on a queued job after this long
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            base_language: "en".to_string(),
            timeout: Duration::from_millis(10_000),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl From<&ClientConfig> for TranslationOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_language: config.base_language.clone(),
            timeout: config.translation.timeout(),
            poll_interval: config.translation.poll_interval(),
        }
    }
}

/// Translates text through the chat service.
#[derive(Clone)]
pub struct TranslationService {
    api: Arc<dyn ChatApi>,
    options: TranslationOptions,
}

impl TranslationService {
    pub fn new(api: Arc<dyn ChatApi>, options: TranslationOptions) -> Self {
        Self { api, options }
    }

    /// Translates `text` into `target_language`.
    ///
    /// Returns `text` unchanged, without a request, when the target is
    /// missing, empty or the base language, or when `text` is empty. Any
    /// failure also returns `text`.
    pub async fn translate(&self, text: &str, target_language: Option<&str>) -> String {
        let Some(target) = target_language.filter(|lang| !lang.is_empty()) else {
            return text.to_string();
        };
        if text.is_empty() || target == self.options.base_language {
            return text.to_string();
        }

        match self.request(text, target).await {
            Ok(Some(translated)) => translated,
            Ok(None) => text.to_string(),
            Err(err) if err.is_unauthorized() => {
                tracing::debug!("Translation aborted after auth failure");
                text.to_string()
            }
            Err(err) => {
                tracing::warn!(target_language = target, "Translation failed: {}", err);
                text.to_string()
            }
        }
    }

    /// Translates a batch, sending each distinct non-empty string once.
    ///
    /// The output has one entry per input, in input order.
    pub async fn translate_many(&self, texts: &[String], target_language: Option<&str>) -> Vec<String> {
        let mut unique: Vec<&str> = Vec::new();
        for text in texts {
            if !text.is_empty() && !unique.contains(&text.as_str()) {
                unique.push(text);
            }
        }

        let translated = join_all(
            unique
                .iter()
                .map(|text| self.translate(text, target_language)),
        )
        .await;
        let translations: HashMap<&str, String> = unique.into_iter().zip(translated).collect();

        texts
            .iter()
            .map(|text| {
                translations
                    .get(text.as_str())
                    .cloned()
                    .unwrap_or_else(|| text.clone())
            })
            .collect()
    }

    /// Returns `Ok(None)` whenever the source text should be used.
    async fn request(&self, text: &str, target: &str) -> Result<Option<String>> {
        match self.api.request_translation(text, target).await? {
            TranslateResponse::Ready { result } => Ok(result),
            TranslateResponse::Accepted {
                request_id: Some(request_id),
            } => self.poll(&request_id).await,
            TranslateResponse::Accepted { request_id: None } => {
                tracing::warn!("Translation accepted without a request id");
                Ok(None)
            }
            TranslateResponse::Unexpected { status } => {
                tracing::warn!(status, "Unexpected translate response");
                Ok(None)
            }
        }
    }

    async fn poll(&self, request_id: &str) -> Result<Option<String>> {
        let started = Instant::now();

        while started.elapsed() < self.options.timeout {
            sleep(self.options.poll_interval).await;

            match self.api.poll_translation(request_id).await? {
                PollResponse::Job(job) => match job.status {
                    JobStatus::Completed => return Ok(job.result),
                    JobStatus::Failed => {
                        tracing::warn!(request_id, "Translation job failed");
                        return Ok(None);
                    }
                    JobStatus::Pending | JobStatus::Unknown => {}
                },
                PollResponse::NotReady => {}
                PollResponse::Unexpected { status } => {
                    tracing::debug!(request_id, status, "Unexpected poll response, polling on");
                }
            }
        }

        tracing::warn!(
            request_id,
            timeout_ms = self.options.timeout.as_millis() as u64,
            "Translation timed out"
        );
        Ok(None)
    }
}
