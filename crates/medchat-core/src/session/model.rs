//! Session domain models.

use super::message::ConversationMessage;
use serde::{Deserialize, Serialize};

/// Title shown for sessions the server has not named yet.
pub const UNTITLED_SESSION: &str = "Untitled Chat";

/// An entry of the session list.
///
/// Sessions are created server-side on the first message of a new
/// conversation; the client only lists, loads and deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Opaque session identifier
    pub id: String,
    /// Human-readable session title, absent until the server names it
    #[serde(default)]
    pub title: Option<String>,
}

impl SessionSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
        }
    }

    /// Returns the title to display, falling back to [`UNTITLED_SESSION`].
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => UNTITLED_SESSION,
        }
    }
}

/// Full history of a session, as returned by the load endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    pub messages: Vec<ConversationMessage>,
    /// Follow-up suggestions stored with the session (untranslated)
    #[serde(default)]
    pub suggestions: Vec<String>,
}
