//! Failure taxonomy of the chat relay.

use std::time::Duration;

use crate::domain::chat::RunStatus;
use crate::ports::AssistantError;

/// Errors returned by the chat handlers.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// API credential or assistant id is not configured.
    #[error("Missing OpenAI configuration")]
    ConfigurationMissing,

    /// Thread id or message text absent from the request.
    #[error("Missing threadId or message")]
    MissingField,

    /// A call to the assistant service failed.
    #[error("assistant service call failed: {0}")]
    ExternalCallFailed(#[from] AssistantError),

    /// The run was still queued or in progress when the poll budget ran out.
    #[error("Request timed out after {polls} status checks ({waited:?})")]
    Timeout { polls: u32, waited: Duration },

    /// The run ended in the `failed` status.
    #[error("Assistant run failed: {0}")]
    RunFailed(String),

    /// The run ended in a terminal status other than completed or failed.
    #[error("Unexpected run status: {0}")]
    UnexpectedStatus(RunStatus),

    /// The run completed but the thread held no usable reply.
    #[error("No response generated")]
    EmptyResponse,
}
