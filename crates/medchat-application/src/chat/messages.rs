use super::controller::ChatController;
use medchat_core::api::{ChatRequest, SuggestRequest};
use medchat_core::error::Result;
use medchat_core::session::MessageRole;
use medchat_core::view::MessageHandle;
use tokio::time::sleep;

impl ChatController {
    /// Handles text typed into the input box.
    ///
    /// Blank input and input arriving while a message is in flight are
    /// dropped.
    pub async fn submit(&self, raw: &str) -> Result<()> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(());
        }

        {
            let mut state = self.state.write().await;
            if state.input_busy {
                tracing::debug!("Message already in flight, ignoring submit");
                return Ok(());
            }
            state.input_busy = true;
        }

        self.view.set_input_busy(true);
        self.view.clear_input();
        self.view.append_message(MessageRole::User, text);
        self.view.scroll_to_bottom();

        let result = self.send_message(text).await;
        self.state.write().await.input_busy = false;
        result
    }

    /// Sends the chip text as the next user message.
    ///
    /// The chips stay on screen when a message is already in flight.
    pub async fn suggestion_clicked(&self, text: &str) -> Result<()> {
        if self.state.read().await.input_busy {
            tracing::debug!("Message already in flight, ignoring suggestion");
            return Ok(());
        }
        self.view.clear_suggestions();
        self.submit(text).await
    }

    /// Sends `text` and renders the reply with its follow-up suggestions.
    ///
    /// The user message is expected to be on screen already. Input is
    /// re-enabled however the exchange ends.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let result = self.exchange(text).await;
        self.view.set_input_busy(false);
        result
    }

    /// Clears the conversation and greets the patient in their language.
    pub async fn show_welcome(&self) {
        self.view.clear_messages();

        let language = self.preferred_language().await;
        let welcome = self
            .translator
            .translate(&self.settings.welcome_message, language.as_deref())
            .await;

        self.state.write().await.localized_welcome = Some(welcome.clone());
        self.view.append_message(MessageRole::Assistant, &welcome);
        self.view.scroll_to_bottom();
    }

    async fn exchange(&self, text: &str) -> Result<()> {
        self.view.clear_suggestions();
        self.view.show_typing_indicator();
        self.view.scroll_to_bottom();

        let request = {
            let state = self.state.read().await;
            ChatRequest {
                message: text.to_string(),
                initial_message: state.localized_welcome.clone(),
                session_id: state.current_session_id.clone(),
            }
        };

        let reply = match self.api.send_message(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                self.view.remove_typing_indicator();
                return Err(err);
            }
        };

        for update in &reply.status_updates {
            self.view.set_status_text(update);
            sleep(self.settings.status_update_delay).await;
        }

        self.view.remove_typing_indicator();
        let reply_handle = self
            .view
            .append_message(MessageRole::Assistant, reply.display_text());

        let created_session = match reply.session_id {
            Some(session_id) => {
                let mut state = self.state.write().await;
                let created = !state.is_current(&session_id);
                if created {
                    tracing::info!(session_id = %session_id, "Conversation moved to session");
                }
                state.current_session_id = Some(session_id);
                created
            }
            None => false,
        };
        self.view.scroll_to_bottom();

        if let Err(err) = self.show_suggestions(reply_handle).await {
            tracing::warn!("Failed to fetch suggestions: {}", err);
        }

        if created_session {
            if let Err(err) = self.list_sessions(true).await {
                tracing::warn!("Failed to refresh sessions: {}", err);
            }
        }

        Ok(())
    }

    async fn show_suggestions(&self, reply: MessageHandle) -> Result<()> {
        let (request, language) = {
            let state = self.state.read().await;
            let request = SuggestRequest {
                session_id: state.current_session_id.clone(),
                cancer_type: state.cancer_type(),
            };
            (request, state.preferred_language())
        };

        let mut suggestions = self.api.suggest(&request).await?;
        suggestions.truncate(self.settings.max_suggestions);

        let chips = self
            .translator
            .translate_many(&suggestions, language.as_deref())
            .await;
        self.render_chips(reply, chips);
        self.view.scroll_to_bottom();
        Ok(())
    }
}
