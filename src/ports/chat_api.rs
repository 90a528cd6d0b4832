//! Chat API Port - the conversation client's view of the relay server.
//!
//! Mirrors the three local endpoints one-to-one. The HTTP adapter lives in
//! `adapters::http::chat::client`; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::domain::foundation::ThreadId;

/// Port for the relay endpoints as seen from the chat client.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `GET /api/chat/status` - whether the server has its credentials.
    async fn check_configuration(&self) -> Result<bool, ChatApiError>;

    /// `POST /api/chat/thread` - allocates a thread for this session.
    async fn create_thread(&self) -> Result<ThreadId, ChatApiError>;

    /// `POST /api/chat/message` - sends a message and waits for the reply text.
    async fn send_message(&self, thread_id: &ThreadId, message: &str)
        -> Result<String, ChatApiError>;
}

/// Errors seen by the chat client.
#[derive(Debug, thiserror::Error)]
pub enum ChatApiError {
    /// Server answered with a failure status and `{error}` body.
    #[error("server returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the `error` field, or the raw body.
        message: String,
    },

    /// Request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
