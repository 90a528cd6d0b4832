//! SendMessageHandler - Relay a user message to the assistant and return its reply.
//!
//! Sequence, each step a blocking call to the assistant service:
//!
//! 1. Append the message to the thread.
//! 2. Start a run of the configured assistant.
//! 3. Poll the run until it leaves `queued`/`in_progress` or the budget runs out.
//! 4. On `completed`, fetch the newest message and strip citation markers.
//!
//! The handler keeps no state between calls. Concurrent sends to one thread
//! are not serialized here; ordering is whatever the service enforces.

use std::sync::Arc;

use crate::application::polling::{poll_until, PollError, PollState};
use crate::domain::chat::{strip_citations, RunStatus};
use crate::domain::foundation::{RunId, ThreadId};
use crate::ports::{AssistantError, AssistantService, RunSnapshot};

use super::{ChatError, ChatSettings};

/// Command to send a message on an existing thread.
///
/// Fields are raw request values; blank ones are rejected by the handler
/// after the configuration check.
#[derive(Debug, Clone, Default)]
pub struct SendMessageCommand {
    pub thread_id: String,
    pub message: String,
}

impl SendMessageCommand {
    pub fn new(thread_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            message: message.into(),
        }
    }

    fn validate(&self) -> Result<ThreadId, ChatError> {
        if self.message.is_empty() {
            return Err(ChatError::MissingField);
        }
        ThreadId::new(self.thread_id.as_str()).map_err(|_| ChatError::MissingField)
    }
}

/// Result of a relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResult {
    /// Reply text with citation markers removed.
    pub response: String,
    pub run_id: RunId,
    /// Number of run status checks performed.
    pub polls: u32,
}

/// Handler for sending messages.
pub struct SendMessageHandler<S: ?Sized + AssistantService> {
    service: Arc<S>,
    settings: ChatSettings,
}

impl<S: ?Sized + AssistantService> SendMessageHandler<S> {
    pub fn new(service: Arc<S>, settings: ChatSettings) -> Self {
        Self { service, settings }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, ChatError> {
        let assistant_id = self.settings.require_assistant()?;
        let thread_id = cmd.validate()?;

        tracing::info!(
            thread_id = %thread_id,
            preview = %preview(&cmd.message),
            "Processing message"
        );

        self.service.append_message(&thread_id, &cmd.message).await?;
        let run_id = self.service.start_run(&thread_id, assistant_id).await?;

        let (snapshot, polls) = self.wait_for_run(&thread_id, &run_id).await?;
        tracing::info!(run_id = %run_id, status = %snapshot.status, polls, "Run finished");

        match snapshot.status {
            RunStatus::Completed => {
                let response = self.fetch_reply(&thread_id).await?;
                Ok(SendMessageResult {
                    response,
                    run_id,
                    polls,
                })
            }
            RunStatus::Failed => {
                let reason = snapshot.failure_reason().unwrap_or("Run failed").to_string();
                Err(ChatError::RunFailed(reason))
            }
            other => Err(ChatError::UnexpectedStatus(other)),
        }
    }

    /// Polls the run until it reaches a terminal status.
    async fn wait_for_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<(RunSnapshot, u32), ChatError> {
        let service = &self.service;

        let polled = poll_until(self.settings.poll_policy(), move || async move {
            let snapshot = service.get_run(thread_id, run_id).await?;
            tracing::debug!(run_id = %run_id, status = %snapshot.status, "Polled run status");
            Ok::<_, AssistantError>(if snapshot.status.is_pending() {
                PollState::Pending
            } else {
                PollState::Ready(snapshot)
            })
        })
        .await
        .map_err(|err| match err {
            PollError::TimedOut { polls, waited } => {
                tracing::warn!(run_id = %run_id, polls, ?waited, "Run did not finish in time");
                ChatError::Timeout { polls, waited }
            }
            PollError::Check(e) => ChatError::ExternalCallFailed(e),
        })?;

        Ok((polled.value, polled.polls))
    }

    /// Reads the newest thread message and strips citation markers.
    async fn fetch_reply(&self, thread_id: &ThreadId) -> Result<String, ChatError> {
        let message = self
            .service
            .latest_message(thread_id)
            .await?
            .ok_or(ChatError::EmptyResponse)?;

        let text = message.first_text().ok_or(ChatError::EmptyResponse)?;
        Ok(strip_citations(text).into_owned())
    }
}

/// First 100 characters of a message, for logs.
fn preview(message: &str) -> String {
    match message.char_indices().nth(100) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}
