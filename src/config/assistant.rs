//! Assistant relay configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::PollPolicy;

/// Credentials and tuning for the hosted assistant.
///
/// Missing credentials are allowed: the relay starts, reports itself as not
/// configured, and refuses chat operations.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Assistant to run against
    pub assistant_id: Option<String>,

    /// Assistants API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value sent in the `OpenAI-Beta` header
    #[serde(default = "default_beta_header")]
    pub beta_header: String,

    /// Per-request timeout for calls to the provider, in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Delay between run status checks, in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Budget for a run to finish, in seconds
    #[serde(default = "default_max_wait")]
    pub max_wait_secs: u64,
}

impl AssistantConfig {
    /// An API key is present and non-blank.
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Both an API key and an assistant id are present and non-blank.
    pub fn is_configured(&self) -> bool {
        let has_assistant = self
            .assistant_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        self.has_api_key() && has_assistant
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_secs(self.poll_interval_secs),
            Duration::from_secs(self.max_wait_secs),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.http_timeout_secs == 0 {
            return Err(ValidationError::InvalidHttpTimeout);
        }
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.max_wait_secs < self.poll_interval_secs {
            return Err(ValidationError::MaxWaitBelowInterval);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            assistant_id: None,
            base_url: default_base_url(),
            beta_header: default_beta_header(),
            http_timeout_secs: default_http_timeout(),
            poll_interval_secs: default_poll_interval(),
            max_wait_secs: default_max_wait(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_beta_header() -> String {
    "assistants=v2".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    2
}

fn default_max_wait() -> u64 {
    60
}
