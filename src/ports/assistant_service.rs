//! Assistant Service Port - Interface to the hosted conversational assistant.
//!
//! The hosted service owns all conversation state: threads, their message
//! history, and runs of the assistant against a thread. This port exposes the
//! five calls the relay needs and nothing else, so the orchestration in
//! `SendMessageHandler` can be driven by a scripted fake.
//!
//! # Example
//!
//! ```ignore
//! let thread = service.create_thread().await?;
//! service.append_message(&thread, "What is a schema?").await?;
//! let run = service.start_run(&thread, &assistant_id).await?;
//! let snapshot = service.get_run(&thread, &run).await?;
//! ```

use async_trait::async_trait;

use crate::domain::chat::{RunError, RunStatus};
use crate::domain::foundation::{AssistantId, RunId, ThreadId};

/// Port for the hosted assistant service.
///
/// Every method is a single blocking round trip. Implementations do not
/// retry.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Allocates a new, empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantError>;

    /// Appends a user message to the thread.
    async fn append_message(&self, thread_id: &ThreadId, content: &str)
        -> Result<(), AssistantError>;

    /// Starts a run of `assistant_id` against the thread's current history.
    async fn start_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<RunId, AssistantError>;

    /// Reads the current state of a run.
    async fn get_run(&self, thread_id: &ThreadId, run_id: &RunId)
        -> Result<RunSnapshot, AssistantError>;

    /// Fetches the newest message in the thread, if any.
    async fn latest_message(&self, thread_id: &ThreadId)
        -> Result<Option<ThreadMessage>, AssistantError>;
}

/// Point-in-time view of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSnapshot {
    pub id: RunId,
    pub status: RunStatus,
    /// Populated by the service when the run failed.
    pub last_error: Option<RunError>,
}

impl RunSnapshot {
    /// Creates a snapshot without failure detail.
    pub fn new(id: RunId, status: RunStatus) -> Self {
        Self {
            id,
            status,
            last_error: None,
        }
    }

    /// Attaches failure detail.
    pub fn with_error(mut self, error: RunError) -> Self {
        self.last_error = Some(error);
        self
    }

    /// Service-provided failure reason, if it sent one.
    pub fn failure_reason(&self) -> Option<&str> {
        self.last_error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}

/// A message stored in a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub id: String,
    pub role: String,
    pub content: Vec<ContentBlock>,
}

impl ThreadMessage {
    /// Value of the first text block, skipping non-text blocks.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { value } => Some(value.as_str()),
            _ => None,
        })
    }
}

/// One content block of a thread message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Plain text, possibly carrying citation markers.
    Text { value: String },
    /// Reference to an uploaded image file.
    ImageFile { file_id: String },
    /// Any block type this crate does not interpret.
    Other { kind: String },
}

/// Errors from the assistant service.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Credential rejected by the service.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Service answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Transport failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Single request exceeded the client timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Response body did not match the expected schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// Adapter could not be set up (bad base URL, HTTP client failure).
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl AssistantError {
    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_id() -> RunId {
        RunId::new("run_1").unwrap()
    }

    #[test]
    fn failure_reason_prefers_service_message() {
        let snapshot = RunSnapshot::new(run_id(), RunStatus::Failed).with_error(RunError {
            code: Some("rate_limit_exceeded".to_string()),
            message: Some("Rate limit reached".to_string()),
        });
        assert_eq!(snapshot.failure_reason(), Some("Rate limit reached"));
    }

    #[test]
    fn failure_reason_ignores_blank_message() {
        let snapshot = RunSnapshot::new(run_id(), RunStatus::Failed).with_error(RunError {
            code: Some("server_error".to_string()),
            message: Some(String::new()),
        });
        assert_eq!(snapshot.failure_reason(), None);
        assert_eq!(RunSnapshot::new(run_id(), RunStatus::Failed).failure_reason(), None);
    }

    #[test]
    fn first_text_skips_non_text_blocks() {
        let message = ThreadMessage {
            id: "msg_1".to_string(),
            role: "assistant".to_string(),
            content: vec![
                ContentBlock::ImageFile {
                    file_id: "file_1".to_string(),
                },
                ContentBlock::Text {
                    value: "chart above".to_string(),
                },
            ],
        };
        assert_eq!(message.first_text(), Some("chart above"));
    }

    #[test]
    fn first_text_is_none_without_text() {
        let message = ThreadMessage {
            id: "msg_1".to_string(),
            role: "assistant".to_string(),
            content: vec![ContentBlock::Other {
                kind: "refusal".to_string(),
            }],
        };
        assert_eq!(message.first_text(), None);
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            AssistantError::status(404, "no such thread").to_string(),
            "unexpected status 404: no such thread"
        );
        assert_eq!(
            AssistantError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
        assert_eq!(AssistantError::AuthenticationFailed.to_string(), "authentication failed");
    }
}
