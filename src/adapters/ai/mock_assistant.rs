//! Mock Assistant Service for testing.
//!
//! Provides a scripted implementation of the AssistantService port so the
//! relay can be exercised without calling the hosted API.
//!
//! # Features
//!
//! - Scripted run status sequences (the last status repeats once exhausted)
//! - Configurable latest message, including "no messages"
//! - Error injection for every call
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let service = MockAssistantService::new()
//!     .with_run_statuses([RunStatus::Queued, RunStatus::Completed])
//!     .with_reply("A schema is a logical grouping.");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::chat::{RunError, RunStatus};
use crate::domain::foundation::{AssistantId, RunId, ThreadId};
use crate::ports::{AssistantError, AssistantService, ContentBlock, RunSnapshot, ThreadMessage};

/// Mock assistant service for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAssistantService {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    thread_ids: VecDeque<String>,
    run_statuses: VecDeque<RunStatus>,
    last_status: Option<RunStatus>,
    run_error: Option<RunError>,
    latest: Option<Option<ThreadMessage>>,
    errors: Vec<(MockOperation, MockError)>,
    runs_started: u32,
    calls: Vec<MockCall>,
}

/// Operations of the port, used to target injected errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOperation {
    CreateThread,
    AppendMessage,
    StartRun,
    GetRun,
    LatestMessage,
}

/// A recorded call to the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateThread,
    AppendMessage { thread_id: String, content: String },
    StartRun { thread_id: String, assistant_id: String },
    GetRun { thread_id: String, run_id: String },
    LatestMessage { thread_id: String },
}

impl MockCall {
    fn operation(&self) -> MockOperation {
        match self {
            MockCall::CreateThread => MockOperation::CreateThread,
            MockCall::AppendMessage { .. } => MockOperation::AppendMessage,
            MockCall::StartRun { .. } => MockOperation::StartRun,
            MockCall::GetRun { .. } => MockOperation::GetRun,
            MockCall::LatestMessage { .. } => MockOperation::LatestMessage,
        }
    }
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate a rejected credential.
    AuthenticationFailed,
    /// Simulate a non-success HTTP status.
    Status { status: u16, body: String },
    /// Simulate a transport failure.
    Network { message: String },
    /// Simulate a request timeout.
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for AssistantError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::AuthenticationFailed => AssistantError::AuthenticationFailed,
            MockError::Status { status, body } => AssistantError::status(status, body),
            MockError::Network { message } => AssistantError::network(message),
            MockError::Timeout { timeout_secs } => AssistantError::Timeout { timeout_secs },
        }
    }
}

impl MockAssistantService {
    /// Creates a mock whose runs complete immediately with a default reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a thread id for the next `create_thread` call.
    pub fn with_thread(self, thread_id: impl Into<String>) -> Self {
        self.state.lock().unwrap().thread_ids.push_back(thread_id.into());
        self
    }

    /// Queues run statuses returned by successive `get_run` calls.
    pub fn with_run_statuses(self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        self.state.lock().unwrap().run_statuses.extend(statuses);
        self
    }

    /// Failure detail attached to `failed` snapshots.
    pub fn with_run_error(self, error: RunError) -> Self {
        self.state.lock().unwrap().run_error = Some(error);
        self
    }

    /// Latest message is a single text block.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        let message = ThreadMessage {
            id: "msg_mock".to_string(),
            role: "assistant".to_string(),
            content: vec![ContentBlock::Text { value: text.into() }],
        };
        self.with_latest_message(Some(message))
    }

    /// Sets the latest message verbatim; `None` simulates an empty thread.
    pub fn with_latest_message(self, message: Option<ThreadMessage>) -> Self {
        self.state.lock().unwrap().latest = Some(message);
        self
    }

    /// Fails the next call of `operation` with `error`.
    pub fn with_error(self, operation: MockOperation, error: MockError) -> Self {
        self.state.lock().unwrap().errors.push((operation, error));
        self
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Returns how many calls of one kind were made.
    pub fn count_of(&self, operation: MockOperation) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Records the call and returns the injected error for it, if any.
    fn record(&self, call: MockCall) -> Result<(), AssistantError> {
        let mut state = self.state.lock().unwrap();
        let operation = call.operation();
        state.calls.push(call);
        let injected = state.errors.iter().position(|(op, _)| *op == operation);
        match injected {
            Some(index) => Err(state.errors.remove(index).1.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AssistantService for MockAssistantService {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        self.record(MockCall::CreateThread)?;
        let id = self
            .state
            .lock()
            .unwrap()
            .thread_ids
            .pop_front()
            .unwrap_or_else(|| "thread_mock".to_string());
        ThreadId::new(id).map_err(|e| AssistantError::parse(e.to_string()))
    }

    async fn append_message(
        &self,
        thread_id: &ThreadId,
        content: &str,
    ) -> Result<(), AssistantError> {
        self.record(MockCall::AppendMessage {
            thread_id: thread_id.to_string(),
            content: content.to_string(),
        })
    }

    async fn start_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<RunId, AssistantError> {
        self.record(MockCall::StartRun {
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        state.runs_started += 1;
        RunId::new(format!("run_mock_{}", state.runs_started))
            .map_err(|e| AssistantError::parse(e.to_string()))
    }

    async fn get_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<RunSnapshot, AssistantError> {
        self.record(MockCall::GetRun {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        let status = match state.run_statuses.pop_front() {
            Some(status) => status,
            None => state.last_status.clone().unwrap_or(RunStatus::Completed),
        };
        state.last_status = Some(status.clone());

        let snapshot = RunSnapshot::new(run_id.clone(), status.clone());
        match (&status, &state.run_error) {
            (RunStatus::Failed, Some(error)) => Ok(snapshot.with_error(error.clone())),
            _ => Ok(snapshot),
        }
    }

    async fn latest_message(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Option<ThreadMessage>, AssistantError> {
        self.record(MockCall::LatestMessage {
            thread_id: thread_id.to_string(),
        })?;
        let state = self.state.lock().unwrap();
        Ok(state.latest.clone().unwrap_or_else(|| {
            Some(ThreadMessage {
                id: "msg_mock".to_string(),
                role: "assistant".to_string(),
                content: vec![ContentBlock::Text {
                    value: "Mock response".to_string(),
                }],
            })
        }))
    }
}
