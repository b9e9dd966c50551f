use super::state::ChatState;
use crate::translation_service::TranslationService;
use medchat_core::api::ChatApi;
use medchat_core::auth::AuthManager;
use medchat_core::config::ClientConfig;
use medchat_core::context::ChatContext;
use medchat_core::view::{ChatView, MessageHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Greeting shown at the start of every new conversation, before translation.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your medical assistant. I can help answer questions about your condition based on medical documents. How can I help you today?";

/// Presentation knobs of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    /// Pause after each revealed status update
    pub status_update_delay: Duration,
    pub max_suggestions: usize,
    pub welcome_message: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            status_update_delay: Duration::from_millis(50),
            max_suggestions: 4,
            welcome_message: WELCOME_MESSAGE.to_string(),
        }
    }
}

impl From<&ClientConfig> for ChatSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            status_update_delay: config.status_update_delay(),
            max_suggestions: config.max_suggestions,
            ..Self::default()
        }
    }
}

/// Drives one chat page.
///
/// # Responsibilities
///
/// - Session switching (list, load, select, delete, start new)
/// - Sending messages and rendering replies, status updates and chips
/// - Loading the patient context and localizing assistant text
///
/// State is held behind an async lock so independent operations can run
/// concurrently; the lock is never held across a request.
pub struct ChatController {
    pub(super) api: Arc<dyn ChatApi>,
    pub(super) view: Arc<dyn ChatView>,
    pub(super) auth: Arc<AuthManager>,
    pub(super) translator: TranslationService,
    pub(super) settings: ChatSettings,
    pub(super) state: Arc<RwLock<ChatState>>,
}

impl ChatController {
    pub fn new(
        api: Arc<dyn ChatApi>,
        view: Arc<dyn ChatView>,
        auth: Arc<AuthManager>,
        translator: TranslationService,
        settings: ChatSettings,
    ) -> Self {
        Self {
            api,
            view,
            auth,
            translator,
            settings,
            state: Arc::new(RwLock::new(ChatState::default())),
        }
    }

    /// Returns a snapshot of the current state.
    pub async fn state(&self) -> ChatState {
        self.state.read().await.clone()
    }

    pub async fn current_session_id(&self) -> Option<String> {
        self.state.read().await.current_session_id.clone()
    }

    /// Returns the cached patient context, if it was loaded.
    pub async fn context(&self) -> Option<ChatContext> {
        self.state.read().await.context.clone()
    }

    pub(super) async fn preferred_language(&self) -> Option<String> {
        self.state.read().await.preferred_language()
    }

    /// Renders at most `max_suggestions` chips under `message`.
    pub(super) fn render_chips(&self, message: MessageHandle, mut chips: Vec<String>) {
        chips.truncate(self.settings.max_suggestions);
        if chips.is_empty() {
            return;
        }
        self.view.render_suggestions(message, &chips);
    }
}
