//! HTTP implementation of the [`ChatApi`] port.
//!
//! Talks to a running relay over its JSON endpoints. Used by the conversation
//! client outside the browser, and by the end-to-end tests.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{ErrorResponse, MessageResponse, SendMessageRequest, StatusResponse, ThreadResponse};
use crate::domain::foundation::ThreadId;
use crate::ports::{ChatApi, ChatApiError};

/// Long enough for a run that uses its whole wait budget.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Relay client over reqwest.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    /// Creates a client for the relay at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ChatApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ChatApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ChatApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ChatApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ChatApiError::InvalidResponse(e.to_string()))
    }
}

fn network(error: reqwest::Error) -> ChatApiError {
    ChatApiError::Network(error.to_string())
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn check_configuration(&self) -> Result<bool, ChatApiError> {
        let response = self
            .client
            .get(self.url("/api/chat/status"))
            .send()
            .await
            .map_err(network)?;
        let status: StatusResponse = Self::read(response).await?;
        Ok(status.configured)
    }

    async fn create_thread(&self) -> Result<ThreadId, ChatApiError> {
        let response = self
            .client
            .post(self.url("/api/chat/thread"))
            .send()
            .await
            .map_err(network)?;
        let thread: ThreadResponse = Self::read(response).await?;
        ThreadId::new(thread.thread_id).map_err(|e| ChatApiError::InvalidResponse(e.to_string()))
    }

    async fn send_message(
        &self,
        thread_id: &ThreadId,
        message: &str,
    ) -> Result<String, ChatApiError> {
        let body = SendMessageRequest {
            thread_id: Some(thread_id.to_string()),
            message: Some(message.to_string()),
        };
        let response = self
            .client
            .post(self.url("/api/chat/message"))
            .json(&body)
            .send()
            .await
            .map_err(network)?;
        let reply: MessageResponse = Self::read(response).await?;
        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpChatApi::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(api.url("/api/chat/status"), "http://127.0.0.1:8080/api/chat/status");
    }
}
