//! Configuration handed to the chat handlers at construction time.

use crate::application::polling::PollPolicy;
use crate::config::AssistantConfig;
use crate::domain::foundation::AssistantId;

use super::ChatError;

/// What the chat handlers need to know about configuration.
///
/// The API credential itself stays inside the assistant adapter; the
/// handlers only need to know whether one was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    api_key_configured: bool,
    assistant_id: Option<AssistantId>,
    poll_policy: PollPolicy,
}

impl ChatSettings {
    pub fn new(api_key_configured: bool, assistant_id: Option<AssistantId>) -> Self {
        Self {
            api_key_configured,
            assistant_id,
            poll_policy: PollPolicy::default(),
        }
    }

    /// Settings for a fully configured relay.
    pub fn configured(assistant_id: AssistantId) -> Self {
        Self::new(true, Some(assistant_id))
    }

    /// Settings with neither credential nor assistant id.
    pub fn unconfigured() -> Self {
        Self::new(false, None)
    }

    /// Derives settings from loaded configuration. Blank values count as absent.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let assistant_id = config
            .assistant_id
            .as_deref()
            .and_then(|id| AssistantId::new(id.trim()).ok());

        Self::new(config.has_api_key(), assistant_id).with_poll_policy(config.poll_policy())
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    /// Both the credential and the assistant id are present.
    pub fn is_configured(&self) -> bool {
        self.api_key_configured && self.assistant_id.is_some()
    }

    /// Returns the assistant id, or `ConfigurationMissing` if the relay is not
    /// fully configured.
    pub fn require_assistant(&self) -> Result<&AssistantId, ChatError> {
        match (&self.assistant_id, self.api_key_configured) {
            (Some(id), true) => Ok(id),
            _ => Err(ChatError::ConfigurationMissing),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }
}
