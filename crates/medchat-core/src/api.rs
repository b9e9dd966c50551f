//! Chat API trait.
//!
//! Defines the interface to the remote chat service, decoupling the
//! controller from the HTTP transport.

use crate::context::ChatContext;
use crate::error::Result;
use crate::session::{SessionHistory, SessionSummary};
use crate::translation::{PollResponse, TranslateResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a chat message request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// The localized welcome text the conversation started from
    pub initial_message: Option<String>,
    /// `None` asks the server to create a new session
    pub session_id: Option<String>,
}

/// Reply to a chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Progress strings the server emitted while answering, in order
    #[serde(default)]
    pub status_updates: Vec<String>,
    /// Session the message was stored in (newly created for a new conversation)
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatReply {
    /// Text to render as the assistant bubble: the response, else the error.
    pub fn display_text(&self) -> &str {
        self.response
            .as_deref()
            .filter(|text| !text.is_empty())
            .or(self.error.as_deref())
            .unwrap_or("")
    }
}

/// Body of a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub session_id: Option<String>,
    pub cancer_type: Option<String>,
}

/// The remote chat service.
///
/// Every method carries the current bearer token and runs the
/// authentication check before looking at a response body; a 401/403
/// surfaces as [`crate::ChatError::Unauthorized`].
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetches the patient's language and cancer-type context.
    async fn fetch_context(&self) -> Result<ChatContext>;

    /// Lists all sessions of the patient.
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Fetches the messages and stored suggestions of a session.
    async fn load_session(&self, session_id: &str) -> Result<SessionHistory>;

    /// Deletes a session server-side.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Sends a user message and waits for the assistant's reply.
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// Requests follow-up suggestions for a session.
    async fn suggest(&self, request: &SuggestRequest) -> Result<Vec<String>>;

    /// Starts a translation.
    async fn request_translation(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslateResponse>;

    /// Polls an asynchronous translation job.
    async fn poll_translation(&self, request_id: &str) -> Result<PollResponse>;
}
