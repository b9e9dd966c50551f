//! Line-oriented terminal rendering of the chat.

use colored::Colorize;
use medchat_core::context::ContextBadge;
use medchat_core::session::{MessageRole, SessionSummary};
use medchat_core::view::{ChatView, MessageHandle};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct TerminalState {
    messages: usize,
    sessions: Vec<SessionSummary>,
    suggestions: Vec<String>,
}

/// Prints the conversation to stdout and remembers what the numbered
/// REPL commands refer to.
#[derive(Debug, Default)]
pub struct TerminalView {
    state: Mutex<TerminalState>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the session at 1-based `index` in the last printed list.
    pub fn session_id(&self, index: usize) -> Option<String> {
        let state = self.lock();
        index
            .checked_sub(1)
            .and_then(|i| state.sessions.get(i))
            .map(|session| session.id.clone())
    }

    /// Display title of the session at 1-based `index`.
    pub fn session_title(&self, index: usize) -> Option<String> {
        let state = self.lock();
        index
            .checked_sub(1)
            .and_then(|i| state.sessions.get(i))
            .map(|session| session.display_title().to_string())
    }

    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn suggestion_count(&self) -> usize {
        self.lock().suggestions.len()
    }

    /// Text of the suggestion chip at 1-based `index`.
    pub fn suggestion(&self, index: usize) -> Option<String> {
        let state = self.lock();
        index
            .checked_sub(1)
            .and_then(|i| state.suggestions.get(i))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, TerminalState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ChatView for TerminalView {
    fn clear_messages(&self) {
        let mut state = self.lock();
        state.messages = 0;
        state.suggestions.clear();
        println!();
        println!("{}", "--- conversation ---".bright_black());
    }

    fn append_message(&self, role: MessageRole, content: &str) -> MessageHandle {
        let mut state = self.lock();
        match role {
            MessageRole::User => {
                println!("{}", "You".green().bold());
                for line in content.lines() {
                    println!("{}", line.green());
                }
            }
            MessageRole::Assistant => {
                println!("{}", "Assistant".bright_blue().bold());
                for line in content.lines() {
                    println!("{}", line.bright_blue());
                }
            }
        }
        println!();
        state.messages += 1;
        MessageHandle(state.messages - 1)
    }

    fn message_count(&self) -> usize {
        self.lock().messages
    }

    fn show_typing_indicator(&self) {
        println!("{}", "Assistant is typing...".bright_black());
    }

    fn set_status_text(&self, text: &str) {
        println!("{}", format!("  {text}").bright_black().italic());
    }

    fn remove_typing_indicator(&self) {}

    fn render_suggestions(&self, _message: MessageHandle, suggestions: &[String]) {
        let mut state = self.lock();
        state.suggestions = suggestions.to_vec();
        println!("{}", "Suggestions (send with /s <n>):".bright_yellow());
        for (i, suggestion) in suggestions.iter().enumerate() {
            println!("  {}", format!("[{}] {}", i + 1, suggestion).yellow());
        }
        println!();
    }

    fn clear_suggestions(&self) {
        self.lock().suggestions.clear();
    }

    fn render_sessions(&self, sessions: &[SessionSummary], current: Option<&str>) {
        let mut state = self.lock();
        state.sessions = sessions.to_vec();
        if sessions.is_empty() {
            println!("{}", "No previous sessions".bright_black());
            return;
        }
        println!("{}", "Sessions".bright_magenta().bold());
        for (i, session) in sessions.iter().enumerate() {
            let line = format!("{:>3}. {}", i + 1, session.display_title());
            if current == Some(session.id.as_str()) {
                println!("{}", format!("{line}  *").bright_magenta());
            } else {
                println!("{}", line.bright_black());
            }
        }
        println!();
    }

    fn set_context_badge(&self, badge: &ContextBadge) {
        if badge.tooltip.is_empty() {
            println!("{}", format!("[{}]", badge.label).bright_magenta());
        } else {
            println!(
                "{} {}",
                format!("[{}]", badge.label).bright_magenta(),
                badge.tooltip.bright_black()
            );
        }
    }

    // Lines are only read between dispatches, so there is nothing to lock.
    fn set_input_busy(&self, _busy: bool) {}

    // The line editor has already consumed the input.
    fn clear_input(&self) {}

    fn scroll_to_bottom(&self) {}
}
