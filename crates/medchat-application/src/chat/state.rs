use medchat_core::context::ChatContext;
use medchat_core::session::SessionSummary;

/// Mutable state of one chat page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    /// Session new messages go to; `None` starts a new conversation
    pub current_session_id: Option<String>,
    pub context: Option<ChatContext>,
    /// Welcome text as shown to the patient, sent as `initial_message`
    pub localized_welcome: Option<String>,
    /// Session list as last fetched
    pub sessions: Vec<SessionSummary>,
    /// True while a submitted message is in flight
    pub input_busy: bool,
}

impl ChatState {
    pub fn is_current(&self, session_id: &str) -> bool {
        self.current_session_id.as_deref() == Some(session_id)
    }

    pub fn preferred_language(&self) -> Option<String> {
        self.context
            .as_ref()
            .and_then(|context| context.preferred_language.clone())
    }

    pub fn cancer_type(&self) -> Option<String> {
        self.context
            .as_ref()
            .and_then(|context| context.main_cancer_type.clone())
    }
}
