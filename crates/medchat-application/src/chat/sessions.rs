use super::controller::ChatController;
use medchat_core::error::Result;

impl ChatController {
    /// Fetches the session list and renders it.
    ///
    /// With no current session, the first listed one becomes current unless
    /// `skip_auto_select` is set.
    pub async fn list_sessions(&self, skip_auto_select: bool) -> Result<()> {
        let sessions = self.api.list_sessions().await?;

        let mut state = self.state.write().await;
        if state.current_session_id.is_none() && !skip_auto_select {
            if let Some(first) = sessions.first() {
                tracing::info!(session_id = %first.id, "Auto-selected most recent session");
                state.current_session_id = Some(first.id.clone());
            }
        }
        self.view
            .render_sessions(&sessions, state.current_session_id.as_deref());
        state.sessions = sessions;
        Ok(())
    }

    /// Shows the history of `session_id`.
    ///
    /// Does nothing if the session is already current and on screen.
    pub async fn load_session(&self, session_id: &str) -> Result<()> {
        let is_current = self.state.read().await.is_current(session_id);
        if is_current && self.view.message_count() > 0 {
            tracing::debug!(session_id, "Session already shown, skipping load");
            return Ok(());
        }
        self.fetch_session(session_id).await
    }

    /// Switches to `session_id` from the session list.
    pub async fn select_session(&self, session_id: &str) -> Result<()> {
        if self.state.read().await.is_current(session_id) {
            return Ok(());
        }

        self.fetch_session(session_id).await?;

        let state = self.state.read().await;
        self.view
            .render_sessions(&state.sessions, state.current_session_id.as_deref());
        self.view.scroll_to_bottom();
        Ok(())
    }

    /// Deletes `session_id` and refreshes the list.
    ///
    /// Deleting the current session returns to the welcome message, and the
    /// refresh then leaves no session selected.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.api.delete_session(session_id).await?;
        tracing::info!(session_id, "Deleted session");

        let was_current = {
            let mut state = self.state.write().await;
            let was_current = state.is_current(session_id);
            if was_current {
                state.current_session_id = None;
            }
            was_current
        };

        if was_current {
            self.show_welcome().await;
        }
        self.list_sessions(was_current).await
    }

    /// Starts a fresh conversation. The server creates the session on the
    /// first message.
    pub async fn start_new_session(&self) {
        let state = {
            let mut state = self.state.write().await;
            state.current_session_id = None;
            state.clone()
        };
        tracing::info!("Starting new chat session");
        self.view.render_sessions(&state.sessions, None);
        self.show_welcome().await;
    }

    async fn fetch_session(&self, session_id: &str) -> Result<()> {
        let history = self.api.load_session(session_id).await?;
        self.state.write().await.current_session_id = Some(session_id.to_string());
        tracing::info!(
            session_id,
            messages = history.messages.len(),
            "Loaded session"
        );

        self.view.clear_messages();
        let mut last = None;
        for message in &history.messages {
            last = Some(self.view.append_message(message.role, &message.content));
        }

        if let Some(last) = last {
            if !history.suggestions.is_empty() {
                let language = self.preferred_language().await;
                let chips = self
                    .translator
                    .translate_many(&history.suggestions, language.as_deref())
                    .await;
                self.render_chips(last, chips);
            }
        }

        self.view.scroll_to_bottom();
        Ok(())
    }
}
