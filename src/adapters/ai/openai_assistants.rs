//! OpenAI Assistants - Implementation of AssistantService for OpenAI's v2 Assistants API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIAssistantsConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let service = OpenAIAssistantsService::new(config)?;
//! ```
//!
//! # Endpoints
//!
//! | Port method      | HTTP call                                         |
//! |------------------|---------------------------------------------------|
//! | `create_thread`  | `POST /threads`                                   |
//! | `append_message` | `POST /threads/{thread}/messages`                 |
//! | `start_run`      | `POST /threads/{thread}/runs`                     |
//! | `get_run`        | `GET /threads/{thread}/runs/{run}`                |
//! | `latest_message` | `GET /threads/{thread}/messages?limit=1&order=desc` |
//!
//! Every request carries bearer auth and the `OpenAI-Beta` feature header.
//! Nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AssistantConfig;
use crate::domain::chat::{RunError, RunStatus};
use crate::domain::foundation::{AssistantId, RunId, ThreadId};
use crate::ports::{AssistantError, AssistantService, ContentBlock, RunSnapshot, ThreadMessage};

/// Configuration for the OpenAI Assistants adapter.
#[derive(Debug, Clone)]
pub struct OpenAIAssistantsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Value of the `OpenAI-Beta` header.
    pub beta_header: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OpenAIAssistantsConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            beta_header: "assistants=v2".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builds the adapter configuration from application configuration.
    ///
    /// A missing key becomes an empty one; the handlers refuse to call the
    /// service before that matters.
    pub fn from_app_config(config: &AssistantConfig) -> Self {
        let api_key = config
            .openai_api_key
            .as_ref()
            .map(|key| key.expose_secret().trim().to_string())
            .unwrap_or_default();

        Self::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_beta_header(config.beta_header.clone())
            .with_timeout(config.http_timeout())
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the `OpenAI-Beta` header value.
    pub fn with_beta_header(mut self, value: impl Into<String>) -> Self {
        self.beta_header = value.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Assistants API adapter.
pub struct OpenAIAssistantsService {
    config: OpenAIAssistantsConfig,
    base_url: Url,
    client: Client,
}

impl OpenAIAssistantsService {
    /// Creates the adapter, validating the base URL and building the HTTP client.
    pub fn new(config: OpenAIAssistantsConfig) -> Result<Self, AssistantError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AssistantError::Configuration(format!("invalid base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AssistantError::Configuration(format!(
                "base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AssistantError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AssistantError::Configuration("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Adds auth and feature headers.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("OpenAI-Beta", &self.config.beta_header)
    }

    /// Sends a request and decodes a successful JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AssistantError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = Self::handle_response_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse response: {}", e)))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AssistantError {
        if e.is_timeout() {
            AssistantError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AssistantError::network(format!("Connection failed: {}", e))
        } else {
            AssistantError::network(e.to_string())
        }
    }

    /// Maps non-success statuses to errors.
    async fn handle_response_status(response: Response) -> Result<Response, AssistantError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(AssistantError::AuthenticationFailed),
            code => Err(AssistantError::status(code, error_body)),
        }
    }
}

#[async_trait]
impl AssistantService for OpenAIAssistantsService {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let url = self.endpoint(&["threads"])?;
        let thread: ObjectRef = self
            .send(self.client.post(url).json(&serde_json::json!({})))
            .await?;

        tracing::debug!(thread_id = %thread.id, "created assistant thread");
        ThreadId::new(thread.id).map_err(|e| AssistantError::parse(e.to_string()))
    }

    async fn append_message(
        &self,
        thread_id: &ThreadId,
        content: &str,
    ) -> Result<(), AssistantError> {
        let url = self.endpoint(&["threads", thread_id.as_str(), "messages"])?;
        let body = CreateMessageRequest {
            role: "user",
            content,
        };
        let message: ObjectRef = self.send(self.client.post(url).json(&body)).await?;

        tracing::debug!(thread_id = %thread_id, message_id = %message.id, "appended user message");
        Ok(())
    }

    async fn start_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<RunId, AssistantError> {
        let url = self.endpoint(&["threads", thread_id.as_str(), "runs"])?;
        let body = CreateRunRequest {
            assistant_id: assistant_id.as_str(),
        };
        let run: RunObject = self.send(self.client.post(url).json(&body)).await?;

        tracing::debug!(thread_id = %thread_id, run_id = %run.id, status = %run.status, "started run");
        RunId::new(run.id).map_err(|e| AssistantError::parse(e.to_string()))
    }

    async fn get_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<RunSnapshot, AssistantError> {
        let url = self.endpoint(&["threads", thread_id.as_str(), "runs", run_id.as_str()])?;
        let run: RunObject = self.send(self.client.get(url)).await?;

        Ok(RunSnapshot {
            id: run_id.clone(),
            status: run.status,
            last_error: run.last_error,
        })
    }

    async fn latest_message(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Option<ThreadMessage>, AssistantError> {
        let url = self.endpoint(&["threads", thread_id.as_str(), "messages"])?;
        let list: MessageList = self
            .send(
                self.client
                    .get(url)
                    .query(&[("limit", "1"), ("order", "desc")]),
            )
            .await?;

        Ok(list.data.into_iter().next().map(ThreadMessage::from))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

/// Any object where only the id matters.
#[derive(Debug, Deserialize)]
struct ObjectRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: RunStatus,
    #[serde(default)]
    last_error: Option<RunError>,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    #[serde(default)]
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    id: String,
    role: String,
    #[serde(default)]
    content: Vec<WireContent>,
}

#[derive(Debug, Deserialize)]
struct WireContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<WireText>,
    image_file: Option<WireImageFile>,
}

#[derive(Debug, Deserialize)]
struct WireText {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WireImageFile {
    file_id: String,
}

impl From<MessageObject> for ThreadMessage {
    fn from(message: MessageObject) -> Self {
        ThreadMessage {
            id: message.id,
            role: message.role,
            content: message.content.into_iter().map(ContentBlock::from).collect(),
        }
    }
}

impl From<WireContent> for ContentBlock {
    fn from(block: WireContent) -> Self {
        match (block.kind.as_str(), block.text, block.image_file) {
            ("text", Some(text), _) => ContentBlock::Text { value: text.value },
            ("image_file", _, Some(image)) => ContentBlock::ImageFile {
                file_id: image.file_id,
            },
            _ => ContentBlock::Other { kind: block.kind },
        }
    }
}
