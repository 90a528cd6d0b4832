//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Assistant base URL must use http or https")]
    InvalidBaseUrl,

    #[error("Invalid provider HTTP timeout")]
    InvalidHttpTimeout,

    #[error("Poll interval must be greater than zero")]
    InvalidPollInterval,

    #[error("Max wait must be at least one poll interval")]
    MaxWaitBelowInterval,

    #[error("Request timeout ({request_secs}s) must exceed the run wait budget ({max_wait_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, max_wait_secs: u64 },
}
