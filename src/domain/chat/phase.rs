//! Lifecycle of the conversation client.
//!
//! ```text
//! CheckingConfiguration --[not configured]--> NotConfigured
//! CheckingConfiguration --[configured]------> CreatingThread
//! CreatingThread --[thread created]--> Idle
//! CreatingThread --[creation failed]--> ThreadUnavailable
//! Idle <--> Sending
//! ```
//!
//! `NotConfigured` and `ThreadUnavailable` are terminal: the input stays
//! disabled until the page (client) is recreated.

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Phase of the conversation client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientPhase {
    /// Waiting for the configuration check.
    CheckingConfiguration,
    /// Server is missing its credential or assistant id; setup instructions shown.
    NotConfigured,
    /// Configured, waiting for a thread to be allocated.
    CreatingThread,
    /// Thread creation failed; no usable thread.
    ThreadUnavailable,
    /// Thread ready, waiting for input.
    Idle,
    /// A message is in flight.
    Sending,
}

impl ClientPhase {
    /// True when the user may submit a message.
    pub fn accepts_input(&self) -> bool {
        matches!(self, ClientPhase::Idle)
    }
}

impl StateMachine for ClientPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ClientPhase::*;
        matches!(
            (self, target),
            (CheckingConfiguration, NotConfigured)
                | (CheckingConfiguration, CreatingThread)
                | (CreatingThread, Idle)
                | (CreatingThread, ThreadUnavailable)
                | (Idle, Sending)
                | (Sending, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ClientPhase::*;
        match self {
            CheckingConfiguration => vec![NotConfigured, CreatingThread],
            NotConfigured => vec![],
            CreatingThread => vec![Idle, ThreadUnavailable],
            ThreadUnavailable => vec![],
            Idle => vec![Sending],
            Sending => vec![Idle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClientPhase::*;

    const ALL: [ClientPhase; 6] = [
        CheckingConfiguration,
        NotConfigured,
        CreatingThread,
        ThreadUnavailable,
        Idle,
        Sending,
    ];

    #[test]
    fn only_idle_accepts_input() {
        for phase in ALL {
            assert_eq!(phase.accepts_input(), phase == Idle, "{phase:?}");
        }
    }

    #[test]
    fn setup_failures_are_terminal() {
        assert!(NotConfigured.is_terminal());
        assert!(ThreadUnavailable.is_terminal());
        assert!(!Idle.is_terminal());
        assert!(!Sending.is_terminal());
    }

    #[test]
    fn send_cycle_is_reversible() {
        let phase = Idle.transition_to(Sending).unwrap();
        assert_eq!(phase.transition_to(Idle), Ok(Idle));
    }

    #[test]
    fn cannot_send_before_thread_exists() {
        assert!(CheckingConfiguration.transition_to(Sending).is_err());
        assert!(CreatingThread.transition_to(Sending).is_err());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{from:?} -> {to:?}"
                );
            }
        }
    }
}
