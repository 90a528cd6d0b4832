//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `AssistantService` - the hosted assistant (threads, runs, messages)
//! - `ChatApi` - the relay endpoints as consumed by the conversation client

mod assistant_service;
mod chat_api;

pub use assistant_service::{
    AssistantError, AssistantService, ContentBlock, RunSnapshot, ThreadMessage,
};
pub use chat_api::{ChatApi, ChatApiError};
