//! Translation protocol types.
//!
//! A translation request either hits the server cache and answers at once,
//! or is accepted as a job that the client polls until it reaches a
//! terminal status.

use serde::{Deserialize, Serialize};

/// Status of an asynchronous translation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
    /// Any status string this client does not know; treated as not terminal.
    #[serde(other)]
    Unknown,
}

/// A server-side translation job, observed through one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationJob {
    pub request_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub result: Option<String>,
}

/// Answer to the initial translate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateResponse {
    /// HTTP 200: the translation was cached.
    Ready { result: Option<String> },
    /// HTTP 202: a job was queued and must be polled.
    Accepted { request_id: Option<String> },
    /// Any other status code.
    Unexpected { status: u16 },
}

/// Answer to one poll of the result endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResponse {
    /// HTTP 200 with the job's current state.
    Job(TranslationJob),
    /// HTTP 404: the job is not ready yet.
    NotReady,
    /// Any other status code.
    Unexpected { status: u16 },
}
