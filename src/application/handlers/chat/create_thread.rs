//! CreateThreadHandler - Allocate a conversation thread on the assistant service.

use std::sync::Arc;

use crate::domain::foundation::ThreadId;
use crate::ports::AssistantService;

use super::{ChatError, ChatSettings};

/// Handler for thread creation.
pub struct CreateThreadHandler<S: ?Sized + AssistantService> {
    service: Arc<S>,
    settings: ChatSettings,
}

impl<S: ?Sized + AssistantService> CreateThreadHandler<S> {
    pub fn new(service: Arc<S>, settings: ChatSettings) -> Self {
        Self { service, settings }
    }

    /// Fails with `ConfigurationMissing` before any external call when the
    /// relay is not configured.
    pub async fn handle(&self) -> Result<ThreadId, ChatError> {
        self.settings.require_assistant()?;

        let thread_id = self.service.create_thread().await?;
        tracing::info!(thread_id = %thread_id, "New thread created");

        Ok(thread_id)
    }
}
