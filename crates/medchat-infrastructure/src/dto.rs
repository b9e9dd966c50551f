//! Wire formats of the chat service.
//!
//! These mirror the JSON the server actually sends, nulls and all, and
//! convert into the domain models of `medchat_core`.

use medchat_core::api::ChatReply;
use medchat_core::context::ChatContext;
use medchat_core::session::{ConversationMessage, SessionHistory, SessionSummary};
use medchat_core::translation::{JobStatus, TranslationJob};
use serde::{Deserialize, Serialize};

/// An identifier the server may encode as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContextDto {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub main_cancer_type: Option<String>,
    #[serde(default)]
    pub sub_cancer_type: Option<String>,
    #[serde(default)]
    pub is_fallback: bool,
}

impl From<ContextDto> for ChatContext {
    fn from(dto: ContextDto) -> Self {
        ChatContext {
            preferred_language: dto.language,
            main_cancer_type: dto.main_cancer_type,
            sub_cancer_type: dto.sub_cancer_type,
            is_fallback: dto.is_fallback,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SessionDto {
    pub id: WireId,
    #[serde(default)]
    pub title: Option<String>,
}

impl From<SessionDto> for SessionSummary {
    fn from(dto: SessionDto) -> Self {
        SessionSummary {
            id: dto.id.into(),
            title: dto.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadSessionRequestDto<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SessionHistoryDto {
    #[serde(default)]
    pub messages: Option<Vec<ConversationMessage>>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

impl From<SessionHistoryDto> for SessionHistory {
    fn from(dto: SessionHistoryDto) -> Self {
        SessionHistory {
            messages: dto.messages.unwrap_or_default(),
            suggestions: dto.suggestions.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatReplyDto {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status_updates: Option<Vec<String>>,
    #[serde(default)]
    pub session_id: Option<WireId>,
}

impl From<ChatReplyDto> for ChatReply {
    fn from(dto: ChatReplyDto) -> Self {
        ChatReply {
            response: dto.response,
            error: dto.error,
            status_updates: dto.status_updates.unwrap_or_default(),
            session_id: dto.session_id.map(String::from),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestResponseDto {
    #[serde(default)]
    pub top_4: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct TranslateRequestDto<'a> {
    pub text: &'a str,
    pub target_language: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TranslateReadyDto {
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateAcceptedDto {
    #[serde(default)]
    pub request_id: Option<WireId>,
}

#[derive(Debug, Deserialize)]
pub struct TranslationJobDto {
    /// Missing or null means the job has not reported a status yet.
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub result: Option<String>,
}

impl TranslationJobDto {
    pub fn into_job(self, request_id: &str) -> TranslationJob {
        TranslationJob {
            request_id: request_id.to_string(),
            status: self.status.unwrap_or(JobStatus::Unknown),
            result: self.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids_become_strings() {
        let session: SessionDto = serde_json::from_str(r#"{"id":42,"title":null}"#).unwrap();
        let summary: SessionSummary = session.into();
        assert_eq!(summary.id, "42");
        assert_eq!(summary.title, None);
    }

    #[test]
    fn test_reply_tolerates_nulls() {
        let dto: ChatReplyDto = serde_json::from_str(
            r#"{"response":"Hi","status_updates":null,"session_id":"S1"}"#,
        )
        .unwrap();
        let reply: ChatReply = dto.into();
        assert_eq!(reply.response.as_deref(), Some("Hi"));
        assert!(reply.status_updates.is_empty());
        assert_eq!(reply.session_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_history_with_null_suggestions() {
        let dto: SessionHistoryDto = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"q"},{"role":"assistant","content":"a"}],"suggestions":null}"#,
        )
        .unwrap();
        let history: SessionHistory = dto.into();
        assert_eq!(history.messages.len(), 2);
        assert!(history.suggestions.is_empty());
    }

    #[test]
    fn test_job_without_status_is_not_terminal() {
        for body in [r#"{"result":null}"#, r#"{"status":null}"#, r#"{}"#] {
            let dto: TranslationJobDto = serde_json::from_str(body).unwrap();
            let job = dto.into_job("r1");
            assert_eq!(job.status, JobStatus::Unknown, "body: {body}");
            assert_eq!(job.result, None);
        }
    }

    #[test]
    fn test_job_with_status_decodes() {
        let dto: TranslationJobDto =
            serde_json::from_str(r#"{"status":"completed","result":"Hallo"}"#).unwrap();
        let job = dto.into_job("r1");
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.result.as_deref(), Some("Hallo"));
        assert_eq!(job.request_id, "r1");
    }
}
