//! ConversationClient - the chat front end's state, independent of rendering.
//!
//! Drives the relay through the [`ChatApi`] port:
//!
//! 1. [`start`](ConversationClient::start) checks configuration and, if the
//!    server is configured, allocates a thread and greets the user.
//! 2. [`submit`](ConversationClient::submit) appends the user's message, sends
//!    it, and appends either the reply or an error notice.
//!
//! The transcript only ever grows. `submit` takes `&mut self`, so one client
//! cannot have two sends in flight.

use std::sync::Arc;

use crate::domain::chat::{ChatMessage, ClientPhase};
use crate::domain::foundation::{StateMachine, ThreadId};
use crate::ports::ChatApi;

/// First message shown once a thread is ready.
pub const GREETING: &str =
    "Hello! I'm here to help you with questions about your data warehouse. What would you like to know?";

/// Shown when no thread could be created.
pub const START_FAILURE_NOTICE: &str =
    "Sorry, I couldn't start the conversation. Please check your configuration and try refreshing the page.";

/// Shown when a message could not be answered.
pub const SEND_FAILURE_NOTICE: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Starter questions offered before the conversation gets going.
pub const SUGGESTIONS: [&str; 2] = [
    "Where can I find customer data in my data warehouse?",
    "Can you explain to me what a schema is? I'm a business user.",
];

/// Shown instead of the chat when the server is not configured.
pub const SETUP_INSTRUCTIONS: &str = "Missing OpenAI API key or Assistant ID.\n\
Set these server-side environment variables and restart:\n\
  OPENAI_API_KEY=your_key_here\n\
  ASSISTANT_ID=asst_your_id_here";

/// What happened to a submitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The assistant's reply was appended.
    Replied,
    /// Sending failed; an error notice was appended.
    Failed,
    /// Nothing was sent or appended.
    Ignored(IgnoreReason),
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input was empty after trimming.
    EmptyInput,
    /// No thread exists (not configured, or creation failed).
    NoThread,
    /// The client is not idle.
    Busy,
    /// No suggestion is on offer at that index.
    NoSuggestion,
}

/// Client-side conversation state.
pub struct ConversationClient<A: ?Sized + ChatApi> {
    api: Arc<A>,
    phase: ClientPhase,
    thread_id: Option<ThreadId>,
    messages: Vec<ChatMessage>,
}

impl<A: ?Sized + ChatApi> ConversationClient<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            phase: ClientPhase::CheckingConfiguration,
            thread_id: None,
            messages: Vec::new(),
        }
    }

    /// Checks configuration and opens a thread. Calling it again is a no-op.
    pub async fn start(&mut self) -> ClientPhase {
        if self.phase != ClientPhase::CheckingConfiguration {
            return self.phase;
        }

        let configured = match self.api.check_configuration().await {
            Ok(configured) => configured,
            Err(e) => {
                tracing::error!(error = %e, "Failed to check configuration");
                false
            }
        };

        if !configured {
            self.advance(ClientPhase::NotConfigured);
            return self.phase;
        }

        self.advance(ClientPhase::CreatingThread);
        tracing::debug!("Creating new conversation thread...");

        match self.api.create_thread().await {
            Ok(thread_id) => {
                tracing::info!(thread_id = %thread_id, "New thread created");
                self.thread_id = Some(thread_id);
                self.messages.push(ChatMessage::assistant(GREETING));
                self.advance(ClientPhase::Idle);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start conversation");
                self.messages.push(ChatMessage::assistant_error(START_FAILURE_NOTICE));
                self.advance(ClientPhase::ThreadUnavailable);
            }
        }

        self.phase
    }

    /// Sends `text` if it is non-blank and a thread is ready.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        let Some(thread_id) = self.thread_id.clone() else {
            return SubmitOutcome::Ignored(IgnoreReason::NoThread);
        };
        if !self.phase.accepts_input() {
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }

        self.messages.push(ChatMessage::user(text));
        self.advance(ClientPhase::Sending);

        let outcome = match self.api.send_message(&thread_id, text).await {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply));
                SubmitOutcome::Replied
            }
            Err(e) => {
                tracing::error!(thread_id = %thread_id, error = %e, "Error sending message");
                self.messages.push(ChatMessage::assistant_error(SEND_FAILURE_NOTICE));
                SubmitOutcome::Failed
            }
        };

        self.advance(ClientPhase::Idle);
        outcome
    }

    /// Suggested questions, offered only while the transcript holds at most
    /// the greeting and the client is idle.
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.messages.len() <= 1 && self.input_enabled() {
            &SUGGESTIONS
        } else {
            &[]
        }
    }

    /// Sends the suggestion at `index` exactly as if the user had typed it.
    pub async fn submit_suggestion(&mut self, index: usize) -> SubmitOutcome {
        match self.suggestions().get(index) {
            Some(suggestion) => self.submit(suggestion).await,
            None => SubmitOutcome::Ignored(IgnoreReason::NoSuggestion),
        }
    }

    pub fn phase(&self) -> ClientPhase {
        self.phase
    }

    pub fn thread_id(&self) -> Option<&ThreadId> {
        self.thread_id.as_ref()
    }

    /// Transcript in submission order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the input box should be enabled.
    pub fn input_enabled(&self) -> bool {
        self.thread_id.is_some() && self.phase.accepts_input()
    }

    /// Setup instructions, when the server reported it is not configured.
    pub fn setup_instructions(&self) -> Option<&'static str> {
        (self.phase == ClientPhase::NotConfigured).then_some(SETUP_INSTRUCTIONS)
    }

    fn advance(&mut self, next: ClientPhase) {
        match self.phase.transition_to(next) {
            Ok(phase) => self.phase = phase,
            Err(e) => tracing::warn!(error = %e, "Ignoring invalid client transition"),
        }
    }
}
