//! Hand-written doubles for the `ChatApi` and `ChatView` seams.

use crate::chat::{ChatController, ChatSettings};
use crate::translation_service::{TranslationOptions, TranslationService};
use async_trait::async_trait;
use medchat_core::api::{ChatApi, ChatReply, ChatRequest, SuggestRequest};
use medchat_core::auth::{AuthManager, InMemoryTokenStore, LoginRedirect};
use medchat_core::context::{ChatContext, ContextBadge};
use medchat_core::error::Result;
use medchat_core::session::{
    ConversationMessage, MessageRole, SessionHistory, SessionSummary,
};
use medchat_core::translation::{PollResponse, TranslateResponse};
use medchat_core::view::{ChatView, MessageHandle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted chat service that records every call.
///
/// Translations default to a cache hit of `"{text}_{lang}"`; polls default
/// to "not ready" once the scripted ones run out. Scripted 401/403 errors go
/// through the attached `AuthManager` the way the HTTP client does.
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    suggest_requests: Mutex<Vec<SuggestRequest>>,
    context: Mutex<Result<ChatContext>>,
    sessions: Mutex<Result<Vec<SessionSummary>>>,
    history: Mutex<Result<SessionHistory>>,
    delete: Mutex<Result<()>>,
    reply: Mutex<Result<ChatReply>>,
    suggestions: Mutex<Result<Vec<String>>>,
    translate: Mutex<Option<Result<TranslateResponse>>>,
    polls: Mutex<VecDeque<Result<PollResponse>>>,
    poll_count: Mutex<usize>,
    auth: Mutex<Option<Arc<AuthManager>>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            chat_requests: Mutex::new(Vec::new()),
            suggest_requests: Mutex::new(Vec::new()),
            context: Mutex::new(Ok(ChatContext::default())),
            sessions: Mutex::new(Ok(Vec::new())),
            history: Mutex::new(Ok(SessionHistory::default())),
            delete: Mutex::new(Ok(())),
            reply: Mutex::new(Ok(ChatReply::default())),
            suggestions: Mutex::new(Ok(Vec::new())),
            translate: Mutex::new(None),
            polls: Mutex::new(VecDeque::new()),
            poll_count: Mutex::new(0),
            auth: Mutex::new(None),
        }
    }
}

impl MockApi {
    pub fn with_context(self, context: Result<ChatContext>) -> Self {
        *self.context.lock().unwrap() = context;
        self
    }

    pub fn with_sessions(self, ids: &[&str]) -> Self {
        let sessions = ids
            .iter()
            .map(|id| SessionSummary::new(*id, format!("Chat {id}")))
            .collect();
        *self.sessions.lock().unwrap() = Ok(sessions);
        self
    }

    pub fn with_sessions_result(self, sessions: Result<Vec<SessionSummary>>) -> Self {
        *self.sessions.lock().unwrap() = sessions;
        self
    }

    pub fn with_history(self, history: Result<SessionHistory>) -> Self {
        *self.history.lock().unwrap() = history;
        self
    }

    pub fn with_delete(self, result: Result<()>) -> Self {
        *self.delete.lock().unwrap() = result;
        self
    }

    pub fn with_reply(self, reply: Result<ChatReply>) -> Self {
        *self.reply.lock().unwrap() = reply;
        self
    }

    pub fn with_suggestions(self, suggestions: Result<Vec<String>>) -> Self {
        *self.suggestions.lock().unwrap() = suggestions;
        self
    }

    pub fn with_translate(self, response: Result<TranslateResponse>) -> Self {
        *self.translate.lock().unwrap() = Some(response);
        self
    }

    pub fn with_polls(self, polls: Vec<Result<PollResponse>>) -> Self {
        *self.polls.lock().unwrap() = polls.into();
        self
    }

    pub fn set_sessions(&self, ids: &[&str]) {
        *self.sessions.lock().unwrap() = Ok(ids
            .iter()
            .map(|id| SessionSummary::new(*id, format!("Chat {id}")))
            .collect());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub fn suggest_requests(&self) -> Vec<SuggestRequest> {
        self.suggest_requests.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }

    pub fn attach_auth(&self, auth: Arc<AuthManager>) {
        *self.auth.lock().unwrap() = Some(auth);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn checked<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if let (true, Some(status)) = (err.is_unauthorized(), err.status()) {
                if let Some(auth) = self.auth.lock().unwrap().as_ref() {
                    auth.check_status(status);
                }
            }
        }
        result
    }
}

#[async_trait]
impl ChatApi for MockApi {
    async fn fetch_context(&self) -> Result<ChatContext> {
        self.record("fetch_context".to_string());
        self.checked(self.context.lock().unwrap().clone())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.record("list_sessions".to_string());
        self.checked(self.sessions.lock().unwrap().clone())
    }

    async fn load_session(&self, session_id: &str) -> Result<SessionHistory> {
        self.record(format!("load_session:{session_id}"));
        self.checked(self.history.lock().unwrap().clone())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.record(format!("delete_session:{session_id}"));
        self.checked(self.delete.lock().unwrap().clone())
    }

    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.record(format!("send_message:{}", request.message));
        self.chat_requests.lock().unwrap().push(request.clone());
        self.checked(self.reply.lock().unwrap().clone())
    }

    async fn suggest(&self, request: &SuggestRequest) -> Result<Vec<String>> {
        self.record("suggest".to_string());
        self.suggest_requests.lock().unwrap().push(request.clone());
        self.checked(self.suggestions.lock().unwrap().clone())
    }

    async fn request_translation(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslateResponse> {
        self.record(format!("translate:{text}:{target_language}"));
        match self.translate.lock().unwrap().clone() {
            Some(response) => response,
            None => Ok(TranslateResponse::Ready {
                result: Some(format!("{text}_{target_language}")),
            }),
        }
    }

    async fn poll_translation(&self, _request_id: &str) -> Result<PollResponse> {
        *self.poll_count.lock().unwrap() += 1;
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PollResponse::NotReady))
    }
}

/// Everything a `RecordingView` was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Cleared,
    Message(MessageRole, String),
    Typing,
    Status(String),
    TypingRemoved,
    Suggestions(MessageHandle, Vec<String>),
    SuggestionsCleared,
    Sessions(Vec<String>, Option<String>),
    Badge(ContextBadge),
    Busy(bool),
    InputCleared,
    Scrolled,
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    messages: Mutex<Vec<ConversationMessage>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Messages currently on screen.
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// The most recent rendering of the session list.
    pub fn last_sessions(&self) -> Option<(Vec<String>, Option<String>)> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Sessions(ids, current) => Some((ids, current)),
            _ => None,
        })
    }

    pub fn last_suggestions(&self) -> Option<(MessageHandle, Vec<String>)> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Suggestions(handle, chips) => Some((handle, chips)),
            _ => None,
        })
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ChatView for RecordingView {
    fn clear_messages(&self) {
        self.messages.lock().unwrap().clear();
        self.push(ViewEvent::Cleared);
    }

    fn append_message(&self, role: MessageRole, content: &str) -> MessageHandle {
        let mut messages = self.messages.lock().unwrap();
        messages.push(ConversationMessage {
            role,
            content: content.to_string(),
        });
        self.push(ViewEvent::Message(role, content.to_string()));
        MessageHandle(messages.len() - 1)
    }

    fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    fn show_typing_indicator(&self) {
        self.push(ViewEvent::Typing);
    }

    fn set_status_text(&self, text: &str) {
        self.push(ViewEvent::Status(text.to_string()));
    }

    fn remove_typing_indicator(&self) {
        self.push(ViewEvent::TypingRemoved);
    }

    fn render_suggestions(&self, message: MessageHandle, suggestions: &[String]) {
        self.push(ViewEvent::Suggestions(message, suggestions.to_vec()));
    }

    fn clear_suggestions(&self) {
        self.push(ViewEvent::SuggestionsCleared);
    }

    fn render_sessions(&self, sessions: &[SessionSummary], current: Option<&str>) {
        self.push(ViewEvent::Sessions(
            sessions.iter().map(|s| s.id.clone()).collect(),
            current.map(str::to_string),
        ));
    }

    fn set_context_badge(&self, badge: &ContextBadge) {
        self.push(ViewEvent::Badge(badge.clone()));
    }

    fn set_input_busy(&self, busy: bool) {
        self.push(ViewEvent::Busy(busy));
    }

    fn clear_input(&self) {
        self.push(ViewEvent::InputCleared);
    }

    fn scroll_to_bottom(&self) {
        self.push(ViewEvent::Scrolled);
    }
}

#[derive(Default)]
pub struct RecordingRedirect {
    pub locations: Mutex<Vec<String>>,
}

impl LoginRedirect for RecordingRedirect {
    fn redirect(&self, location: &str) {
        self.locations.lock().unwrap().push(location.to_string());
    }
}

pub struct Fixture {
    pub controller: ChatController,
    pub api: Arc<MockApi>,
    pub view: Arc<RecordingView>,
    pub auth: Arc<AuthManager>,
    pub redirect: Arc<RecordingRedirect>,
}

pub fn german_context() -> ChatContext {
    ChatContext {
        preferred_language: Some("de".to_string()),
        main_cancer_type: Some("Uterine".to_string()),
        sub_cancer_type: Some("Endometrial".to_string()),
        is_fallback: false,
    }
}

/// Builds a controller over `api` with no status update delay.
pub fn fixture(api: MockApi) -> Fixture {
    let api = Arc::new(api);
    let view = Arc::new(RecordingView::default());
    let redirect = Arc::new(RecordingRedirect::default());
    let auth = Arc::new(AuthManager::new(
        Arc::new(InMemoryTokenStore::with_token("token")),
        redirect.clone(),
        "/login/",
        "/patient/chat/",
    ));
    api.attach_auth(auth.clone());
    let translator = TranslationService::new(api.clone(), TranslationOptions::default());
    let settings = ChatSettings {
        status_update_delay: Duration::ZERO,
        ..ChatSettings::default()
    };
    let controller = ChatController::new(
        api.clone(),
        view.clone(),
        auth.clone(),
        translator,
        settings,
    );

    Fixture {
        controller,
        api,
        view,
        auth,
        redirect,
    }
}
