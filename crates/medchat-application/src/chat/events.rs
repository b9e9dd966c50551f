use super::controller::ChatController;
use medchat_core::ChatError;

/// Commands a front end raises in response to user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Text entered in the input box
    Submit(String),
    SuggestionClicked(String),
    NewChat,
    SelectSession(String),
    DeleteSession(String),
    /// A new access token was obtained outside the chat page
    TokenRefreshed(String),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Submit(_) => "submit",
            UiEvent::SuggestionClicked(_) => "suggestion_clicked",
            UiEvent::NewChat => "new_chat",
            UiEvent::SelectSession(_) => "select_session",
            UiEvent::DeleteSession(_) => "delete_session",
            UiEvent::TokenRefreshed(_) => "token_refreshed",
        }
    }
}

impl ChatController {
    /// Runs the operation behind `event`. Failures are logged, never returned.
    pub async fn dispatch(&self, event: UiEvent) {
        let operation = event.name();
        let result = match event {
            UiEvent::Submit(text) => self.submit(&text).await,
            UiEvent::SuggestionClicked(text) => self.suggestion_clicked(&text).await,
            UiEvent::NewChat => {
                self.start_new_session().await;
                Ok(())
            }
            UiEvent::SelectSession(id) => self.select_session(&id).await,
            UiEvent::DeleteSession(id) => self.delete_session(&id).await,
            UiEvent::TokenRefreshed(token) => self.auth.update_token(&token),
        };

        if let Err(err) = result {
            report(operation, &err);
        }
    }

    /// Loads sessions and context together, then shows the current session
    /// or the welcome message.
    pub async fn initialize(&self) {
        let (sessions, context) = tokio::join!(self.list_sessions(false), self.load_context());
        if let Err(err) = sessions {
            report("list_sessions", &err);
        }
        if let Err(err) = context {
            report("load_context", &err);
        }

        match self.current_session_id().await {
            Some(session_id) => {
                if let Err(err) = self.load_session(&session_id).await {
                    report("load_session", &err);
                }
            }
            None => self.show_welcome().await,
        }
    }
}

fn report(operation: &str, err: &ChatError) {
    if err.is_unauthorized() {
        tracing::warn!(operation, "Chat operation stopped: {}", err);
    } else {
        tracing::error!(operation, "Chat operation failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::WELCOME_MESSAGE;
    use crate::testing::{MockApi, fixture, german_context};
    use medchat_core::session::{ConversationMessage, SessionHistory};

    #[tokio::test]
    async fn test_initialize_opens_most_recent_session() {
        let fx = fixture(
            MockApi::default()
                .with_context(Ok(german_context()))
                .with_sessions(&["S1", "S2"])
                .with_history(Ok(SessionHistory {
                    messages: vec![ConversationMessage::user("hello")],
                    suggestions: Vec::new(),
                })),
        );

        fx.controller.initialize().await;

        let calls = fx.api.calls();
        assert!(calls.contains(&"list_sessions".to_string()));
        assert!(calls.contains(&"fetch_context".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("load_session:S1"));
        assert_eq!(fx.view.messages(), vec![ConversationMessage::user("hello")]);
    }

    #[tokio::test]
    async fn test_initialize_without_sessions_shows_welcome() {
        let fx = fixture(MockApi::default());

        fx.controller.initialize().await;

        assert_eq!(
            fx.view.messages(),
            vec![ConversationMessage::assistant(WELCOME_MESSAGE)]
        );
        assert_eq!(fx.api.count("load_session"), 0);
    }

    #[tokio::test]
    async fn test_initialize_survives_context_failure() {
        let fx = fixture(
            MockApi::default().with_context(Err(ChatError::network("connection refused"))),
        );

        fx.controller.initialize().await;

        assert_eq!(fx.view.messages().len(), 1);
        assert_eq!(fx.controller.context().await, None);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let fx = fixture(MockApi::default().with_reply(Err(ChatError::network("reset"))));

        fx.controller
            .dispatch(UiEvent::Submit("hello".to_string()))
            .await;

        assert!(!fx.controller.state().await.input_busy);
        assert_eq!(fx.view.messages(), vec![ConversationMessage::user("hello")]);
    }

    #[tokio::test]
    async fn test_dispatch_routes_session_commands() {
        let fx = fixture(MockApi::default().with_sessions(&["S1", "S2"]));
        fx.controller.list_sessions(false).await.unwrap();

        fx.controller
            .dispatch(UiEvent::SelectSession("S2".to_string()))
            .await;
        assert_eq!(fx.controller.current_session_id().await.as_deref(), Some("S2"));

        fx.controller.dispatch(UiEvent::NewChat).await;
        assert_eq!(fx.controller.current_session_id().await, None);

        fx.controller
            .dispatch(UiEvent::DeleteSession("S1".to_string()))
            .await;
        assert_eq!(fx.api.count("delete_session:S1"), 1);
    }

    #[tokio::test]
    async fn test_token_refresh_updates_auth() {
        let fx = fixture(MockApi::default());

        fx.controller
            .dispatch(UiEvent::TokenRefreshed("fresh".to_string()))
            .await;
        assert_eq!(fx.auth.token().as_deref(), Some("fresh"));

        fx.controller
            .dispatch(UiEvent::TokenRefreshed(String::new()))
            .await;
        assert_eq!(fx.auth.token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(UiEvent::NewChat.name(), "new_chat");
        assert_eq!(UiEvent::Submit(String::new()).name(), "submit");
    }
}
