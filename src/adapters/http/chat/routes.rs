//! Route configuration for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_thread, get_status, send_message, ChatAppState};

/// Creates the chat router.
///
/// Routes:
/// - `GET /api/chat/status` - Report whether credentials are configured
/// - `POST /api/chat/thread` - Create a conversation thread
/// - `POST /api/chat/message` - Send a message and wait for the reply
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .route("/api/chat/status", get(get_status))
        .route("/api/chat/thread", post(create_thread))
        .route("/api/chat/message", post(send_message))
}
