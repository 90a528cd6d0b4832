//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `DATABOT__` prefix and nested values
//! are separated by double underscores. The bare `OPENAI_API_KEY` and
//! `ASSISTANT_ID` variables are accepted as fallbacks for the assistant
//! credentials.
//!
//! # Example
//!
//! ```no_run
//! use databot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod assistant;
mod error;
mod server;

pub use assistant::AssistantConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Fallback variable for `assistant.openai_api_key`.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Fallback variable for `assistant.assistant_id`.
pub const ASSISTANT_ID_VAR: &str = "ASSISTANT_ID";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Assistant credentials and polling
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds the assistant credentials from `OPENAI_API_KEY` / `ASSISTANT_ID`
    /// 3. Reads environment variables with `DATABOT` prefix, which win over the seeds
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DATABOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DATABOT__ASSISTANT__MAX_WAIT_SECS=90` -> `assistant.max_wait_secs = 90`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing credentials are not an error.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(key) = std::env::var(OPENAI_API_KEY_VAR) {
            builder = builder.set_default("assistant.openai_api_key", key)?;
        }
        if let Ok(id) = std::env::var(ASSISTANT_ID_VAR) {
            builder = builder.set_default("assistant.assistant_id", id)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("DATABOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or if
    /// the request timeout would cut off a run that is still within its wait
    /// budget.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assistant.validate()?;
        if self.server.request_timeout_secs <= self.assistant.max_wait_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                max_wait_secs: self.assistant.max_wait_secs,
            });
        }
        Ok(())
    }
}
