//! HTTP adapters - REST API implementations.
//!
//! [`build_router`] assembles the chat routes, the health probe and the
//! tower-http middleware stack.

pub mod chat;

// Re-export key types for convenience
pub use chat::{chat_router, ChatAppState, HttpChatApi};

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the full application router.
///
/// CORS is only enabled when `server.cors_origins` lists at least one valid
/// origin; otherwise the relay is same-origin only.
pub fn build_router(state: ChatAppState, server: &ServerConfig) -> Router {
    let router = chat_router()
        .with_state(state)
        .route("/health", get(chat::health));

    let router = match cors_layer(&server.cors_origins_list()) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
