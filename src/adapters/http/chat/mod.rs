//! HTTP adapter for chat endpoints.
//!
//! Exposes the relay via REST API:
//! - `GET /api/chat/status` - Whether credentials are configured
//! - `POST /api/chat/thread` - Create a conversation thread
//! - `POST /api/chat/message` - Send a message and wait for the reply
//!
//! Also provides [`HttpChatApi`], the client side of the same endpoints.

mod client;
mod dto;
mod handlers;
mod routes;

pub use client::HttpChatApi;
pub use dto::{ErrorResponse, MessageResponse, SendMessageRequest, StatusResponse, ThreadResponse};
pub use handlers::{health, ChatAppState, ChatRouteError};
pub use routes::chat_router;
