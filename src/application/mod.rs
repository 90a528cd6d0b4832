//! Application layer - Handlers, polling and the conversation client.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod conversation_client;
pub mod handlers;
pub mod polling;

pub use conversation_client::{ConversationClient, IgnoreReason, SubmitOutcome};
pub use handlers::{
    ChatError, ChatSettings, CheckConfigurationHandler, CreateThreadHandler, SendMessageCommand,
    SendMessageHandler, SendMessageResult,
};
pub use polling::{poll_until, PollError, PollPolicy, PollState, Polled};
