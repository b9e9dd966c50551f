//! HttpChatApi - REST implementation of the chat service.
//!
//! Every request carries the bearer token read from the `AuthManager` at
//! send time, so a token refreshed mid-session is picked up immediately.

use crate::dto::{
    ChatReplyDto, ContextDto, LoadSessionRequestDto, SessionDto, SessionHistoryDto,
    SuggestResponseDto, TranslateAcceptedDto, TranslateReadyDto, TranslateRequestDto,
    TranslationJobDto,
};
use async_trait::async_trait;
use medchat_core::api::{ChatApi, ChatReply, ChatRequest, SuggestRequest};
use medchat_core::auth::AuthManager;
use medchat_core::context::ChatContext;
use medchat_core::error::{ChatError, Result};
use medchat_core::session::{SessionHistory, SessionSummary};
use medchat_core::translation::{PollResponse, TranslateResponse};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const CONTEXT_PATH: &str = "/api/patients/chat/context/";
const SESSIONS_PATH: &str = "/api/patients/chat/sessions/";
const LOAD_PATH: &str = "/api/patients/chat/load/";
const SESSION_PREFIX: &str = "/api/patients/chat/";
const MESSAGE_PATH: &str = "/api/patients/chat/message/";
const SUGGEST_PATH: &str = "/api/suggest/";
const TRANSLATE_PATH: &str = "/api/translate/";
const RESULT_PREFIX: &str = "/api/result/";

/// Chat service client over HTTP.
#[derive(Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: Url,
    auth: Arc<AuthManager>,
}

impl HttpChatApi {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: &str, auth: Arc<AuthManager>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ChatError::config(format!("Invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ChatError::config(format!(
                "Base URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ChatError::config(format!("Invalid endpoint '{path}': {e}")))
    }

    /// Appends percent-encoded `segments` to `prefix`.
    fn endpoint_with_segments(&self, prefix: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint(prefix)?;
        url.path_segments_mut()
            .map_err(|_| ChatError::config(format!("Endpoint '{prefix}' cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request with the current token and runs the auth check.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let token = self.auth.token().unwrap_or_default();
        let response = builder
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| ChatError::network(format!("Chat API request failed: {err}")))?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "Chat API response");

        if self.auth.check_status(status.as_u16()) {
            return Err(ChatError::unauthorized(status.as_u16()));
        }

        Ok(response)
    }

    /// Like `execute`, but any non-success status becomes `ChatError::Http`.
    async fn execute_ok(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.execute(builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(ChatError::http(status.as_u16(), body));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ChatError::network(format!("Failed to read response body: {err}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_context(&self) -> Result<ChatContext> {
        let url = self.endpoint(CONTEXT_PATH)?;
        let response = self.execute_ok(self.client.get(url)).await?;
        let dto: ContextDto = decode(response).await?;
        Ok(dto.into())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let url = self.endpoint(SESSIONS_PATH)?;
        let response = self.execute_ok(self.client.get(url)).await?;
        let sessions: Vec<SessionDto> = decode(response).await?;
        Ok(sessions.into_iter().map(SessionSummary::from).collect())
    }

    async fn load_session(&self, session_id: &str) -> Result<SessionHistory> {
        let url = self.endpoint(LOAD_PATH)?;
        let body = LoadSessionRequestDto { session_id };
        let response = self.execute_ok(self.client.post(url).json(&body)).await?;
        let dto: SessionHistoryDto = decode(response).await?;
        Ok(dto.into())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let url = self.endpoint_with_segments(SESSION_PREFIX, &[session_id, "delete", ""])?;
        self.execute_ok(self.client.delete(url)).await?;
        Ok(())
    }

    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint(MESSAGE_PATH)?;
        let response = self.execute(self.client.post(url).json(request)).await?;
        // The server reports model failures as `{"error": ...}`, sometimes with
        // a 5xx status; the body is rendered either way.
        let dto: ChatReplyDto = decode(response).await?;
        Ok(dto.into())
    }

    async fn suggest(&self, request: &SuggestRequest) -> Result<Vec<String>> {
        let url = self.endpoint(SUGGEST_PATH)?;
        let response = self.execute_ok(self.client.post(url).json(request)).await?;
        let dto: SuggestResponseDto = decode(response).await?;
        Ok(dto.top_4.unwrap_or_default())
    }

    async fn request_translation(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslateResponse> {
        let url = self.endpoint(TRANSLATE_PATH)?;
        let body = TranslateRequestDto {
            text,
            target_language,
        };
        let response = self.execute(self.client.post(url).json(&body)).await?;

        match response.status() {
            StatusCode::OK => {
                let dto: TranslateReadyDto = decode(response).await?;
                Ok(TranslateResponse::Ready { result: dto.result })
            }
            StatusCode::ACCEPTED => {
                let dto: TranslateAcceptedDto = decode(response).await?;
                Ok(TranslateResponse::Accepted {
                    request_id: dto.request_id.map(String::from),
                })
            }
            status => Ok(TranslateResponse::Unexpected {
                status: status.as_u16(),
            }),
        }
    }

    async fn poll_translation(&self, request_id: &str) -> Result<PollResponse> {
        let url = self.endpoint_with_segments(RESULT_PREFIX, &[request_id])?;
        let response = self.execute(self.client.get(url)).await?;

        match response.status() {
            StatusCode::OK => {
                let dto: TranslationJobDto = decode(response).await?;
                Ok(PollResponse::Job(dto.into_job(request_id)))
            }
            StatusCode::NOT_FOUND => Ok(PollResponse::NotReady),
            status => Ok(PollResponse::Unexpected {
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medchat_core::auth::{InMemoryTokenStore, LoginRedirect};

    struct NoRedirect;

    impl LoginRedirect for NoRedirect {
        fn redirect(&self, _location: &str) {}
    }

    fn api(base_url: &str) -> Result<HttpChatApi> {
        let auth = Arc::new(AuthManager::new(
            Arc::new(InMemoryTokenStore::new()),
            Arc::new(NoRedirect),
            "/login/",
            "/patient/chat/",
        ));
        HttpChatApi::new(base_url, auth, Duration::from_secs(5))
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let api = api("http://localhost:8000").unwrap();

        let delete = api
            .endpoint_with_segments(SESSION_PREFIX, &["a b/c", "delete", ""])
            .unwrap();
        assert_eq!(
            delete.as_str(),
            "http://localhost:8000/api/patients/chat/a%20b%2Fc/delete/"
        );

        let result = api.endpoint_with_segments(RESULT_PREFIX, &["req-1"]).unwrap();
        assert_eq!(result.as_str(), "http://localhost:8000/api/result/req-1");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(api("not a url"), Err(ChatError::Config(_))));
        assert!(matches!(api("mailto:care@example.org"), Err(ChatError::Config(_))));
    }
}
