//! Per-patient chat context.
//!
//! The context steers localization (preferred language) and suggestion
//! ranking (cancer type). It is fetched once per controller and cached.

use serde::{Deserialize, Serialize};

/// Badge text shown when the context could not be fetched.
pub const CONTEXT_UNAVAILABLE: &str = "Context unavailable";

/// Patient metadata used to steer assistant behavior and localization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    /// Language code the patient prefers (e.g. "de"); `None` means untranslated.
    pub preferred_language: Option<String>,
    /// Top-level cancer type, sent with suggestion requests.
    pub main_cancer_type: Option<String>,
    /// Specific cancer type, shown in the badge.
    pub sub_cancer_type: Option<String>,
    /// True when the server fell back to generic information.
    pub is_fallback: bool,
}

impl ChatContext {
    /// Builds the badge shown next to the conversation title.
    pub fn badge(&self) -> ContextBadge {
        let sub = self.sub_cancer_type.as_deref().unwrap_or("General");
        let label = if self.is_fallback {
            format!("{sub} Cancer (Default)")
        } else {
            format!("{sub} Cancer")
        };
        let tooltip = if self.is_fallback {
            "Using general uterine cancer information".to_string()
        } else {
            format!("Using {sub} cancer specific information")
        };
        ContextBadge { label, tooltip }
    }
}

/// Label and tooltip of the context badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBadge {
    pub label: String,
    pub tooltip: String,
}

impl ContextBadge {
    pub fn unavailable() -> Self {
        Self {
            label: CONTEXT_UNAVAILABLE.to_string(),
            tooltip: String::new(),
        }
    }
}
