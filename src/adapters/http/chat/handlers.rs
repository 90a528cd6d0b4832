//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the chat application handlers and
//! translate their failures into the relay's `{ "error": ... }` bodies.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::chat::{
    ChatError, ChatSettings, CheckConfigurationHandler, CreateThreadHandler, SendMessageCommand,
    SendMessageHandler,
};
use crate::ports::AssistantService;

use super::dto::{ErrorResponse, MessageResponse, SendMessageRequest, StatusResponse, ThreadResponse};

pub(crate) const THREAD_FAILURE: &str = "Failed to create conversation thread";
pub(crate) const MESSAGE_FAILURE: &str = "Failed to process message";
pub(crate) const INVALID_BODY: &str = "Invalid request body";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the chat routes.
#[derive(Clone)]
pub struct ChatAppState {
    pub assistant_service: Arc<dyn AssistantService>,
    pub settings: ChatSettings,
}

impl ChatAppState {
    pub fn new(assistant_service: Arc<dyn AssistantService>, settings: ChatSettings) -> Self {
        Self {
            assistant_service,
            settings,
        }
    }

    pub fn check_configuration_handler(&self) -> CheckConfigurationHandler {
        CheckConfigurationHandler::new(self.settings.clone())
    }

    pub fn create_thread_handler(&self) -> CreateThreadHandler<dyn AssistantService> {
        CreateThreadHandler::new(self.assistant_service.clone(), self.settings.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler<dyn AssistantService> {
        SendMessageHandler::new(self.assistant_service.clone(), self.settings.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/chat/status - Whether the relay has its credentials
pub async fn get_status(State(state): State<ChatAppState>) -> impl IntoResponse {
    let configured = state.check_configuration_handler().handle();
    Json(StatusResponse { configured })
}

/// POST /api/chat/thread - Allocate a conversation thread
pub async fn create_thread(
    State(state): State<ChatAppState>,
) -> Result<impl IntoResponse, ChatRouteError> {
    let thread_id = state
        .create_thread_handler()
        .handle()
        .await
        .map_err(ChatRouteError::Thread)?;

    Ok(Json(ThreadResponse {
        thread_id: thread_id.into_inner(),
    }))
}

/// POST /api/chat/message - Relay a message and wait for the reply
pub async fn send_message(
    State(state): State<ChatAppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChatRouteError> {
    // An unconfigured relay answers 500 whatever the body holds.
    state
        .settings
        .require_assistant()
        .map_err(ChatRouteError::Message)?;

    let Json(request) = payload.map_err(|rejection| ChatRouteError::InvalidBody(rejection.body_text()))?;

    let cmd = SendMessageCommand::new(
        request.thread_id.unwrap_or_default(),
        request.message.unwrap_or_default(),
    );

    let result = state
        .send_message_handler()
        .handle(cmd)
        .await
        .map_err(ChatRouteError::Message)?;

    Ok(Json(MessageResponse {
        response: result.response,
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Failure of a chat route, tagged with the endpoint it came from.
#[derive(Debug)]
pub enum ChatRouteError {
    /// Body was not valid JSON for the endpoint.
    InvalidBody(String),
    /// `POST /api/chat/thread` failed.
    Thread(ChatError),
    /// `POST /api/chat/message` failed.
    Message(ChatError),
}

impl ChatRouteError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ChatRouteError::InvalidBody(_) => (StatusCode::BAD_REQUEST, INVALID_BODY.to_string()),
            ChatRouteError::Thread(e) => map_chat_error(e, THREAD_FAILURE),
            ChatRouteError::Message(e) => map_chat_error(e, MESSAGE_FAILURE),
        }
    }
}

/// Only configuration and validation failures reach the client verbatim.
/// Run failure reasons stay in the server log.
fn map_chat_error(error: &ChatError, fallback: &str) -> (StatusCode, String) {
    match error {
        ChatError::MissingField => (StatusCode::BAD_REQUEST, error.to_string()),
        ChatError::ConfigurationMissing => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, fallback.to_string()),
    }
}

impl IntoResponse for ChatRouteError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            ChatRouteError::InvalidBody(detail) => {
                tracing::warn!(detail = %detail, "Rejected chat request body");
            }
            ChatRouteError::Thread(e) | ChatRouteError::Message(e) if status.is_server_error() => {
                tracing::error!(error = %e, "Chat request failed");
            }
            ChatRouteError::Thread(e) | ChatRouteError::Message(e) => {
                tracing::warn!(error = %e, "Chat request rejected");
            }
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
