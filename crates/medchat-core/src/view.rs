//! Rendering seam.
//!
//! The controller never touches widgets directly; it drives a `ChatView`.
//! Implementations own whatever is on screen and must be cheap to call,
//! since every method is synchronous.

use crate::context::ContextBadge;
use crate::session::{MessageRole, SessionSummary};

/// Identifies a rendered message so suggestions can be attached under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub usize);

pub trait ChatView: Send + Sync {
    /// Removes every rendered message (and their suggestion chips).
    fn clear_messages(&self);

    /// Renders a message bubble at the end of the conversation.
    fn append_message(&self, role: MessageRole, content: &str) -> MessageHandle;

    /// Number of messages currently rendered.
    fn message_count(&self) -> usize;

    fn show_typing_indicator(&self);

    /// Replaces the text next to the typing indicator.
    fn set_status_text(&self, text: &str);

    fn remove_typing_indicator(&self);

    /// Renders clickable chips under `message`, replacing any chips it had.
    fn render_suggestions(&self, message: MessageHandle, suggestions: &[String]);

    /// Removes all suggestion chips from the conversation.
    fn clear_suggestions(&self);

    /// Renders the session sidebar with `current` highlighted.
    fn render_sessions(&self, sessions: &[SessionSummary], current: Option<&str>);

    fn set_context_badge(&self, badge: &ContextBadge);

    /// Disables (busy) or re-enables the input box and send button.
    fn set_input_busy(&self, busy: bool);

    /// Empties the input box after a submission.
    fn clear_input(&self);

    fn scroll_to_bottom(&self);
}
