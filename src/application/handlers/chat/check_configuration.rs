//! CheckConfigurationHandler - Report whether the relay can reach the assistant.

use super::ChatSettings;

/// Pure read of the configured settings. Never calls the assistant service.
#[derive(Debug, Clone)]
pub struct CheckConfigurationHandler {
    settings: ChatSettings,
}

impl CheckConfigurationHandler {
    pub fn new(settings: ChatSettings) -> Self {
        Self { settings }
    }

    pub fn handle(&self) -> bool {
        self.settings.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AssistantId;

    #[test]
    fn reports_configured_settings() {
        let handler =
            CheckConfigurationHandler::new(ChatSettings::configured(AssistantId::new("asst_1").unwrap()));
        assert!(handler.handle());
    }

    #[test]
    fn reports_missing_settings() {
        let handler = CheckConfigurationHandler::new(ChatSettings::unconfigured());
        assert!(!handler.handle());
    }
}
