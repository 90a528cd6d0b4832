//! Run status as reported by the hosted assistant service.
//!
//! A run moves from `queued` through `in_progress` to a terminal status.
//! Only `queued` and `in_progress` keep the relay polling; every other value,
//! including ones this crate has never heard of, ends the wait.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of one assistant run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    /// A status string the service sent that is not listed above.
    Other(String),
}

impl RunStatus {
    /// Parses the wire representation. Never fails; unknown values land in `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "requires_action" => Self::RequiresAction,
            "cancelling" => Self::Cancelling,
            "cancelled" => Self::Cancelled,
            "failed" => Self::Failed,
            "completed" => Self::Completed,
            "incomplete" => Self::Incomplete,
            "expired" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
            Self::Expired => "expired",
            Self::Other(raw) => raw,
        }
    }

    /// True while the relay should keep polling.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Failure detail attached to a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_queued_and_in_progress_are_pending() {
        assert!(RunStatus::Queued.is_pending());
        assert!(RunStatus::InProgress.is_pending());

        for status in [
            RunStatus::Completed,
            RunStatus::Failed,
            RunStatus::RequiresAction,
            RunStatus::Cancelled,
            RunStatus::Expired,
            RunStatus::Other("paused".to_string()),
        ] {
            assert!(!status.is_pending(), "{status} should be terminal");
        }
    }

    #[test]
    fn parse_and_as_str_agree() {
        for raw in [
            "queued",
            "in_progress",
            "requires_action",
            "cancelling",
            "cancelled",
            "failed",
            "completed",
            "incomplete",
            "expired",
            "something_new",
        ] {
            assert_eq!(RunStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn unknown_status_deserializes_to_other() {
        let status: RunStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, RunStatus::Other("paused".to_string()));
    }

    #[test]
    fn run_error_tolerates_missing_fields() {
        let err: RunError = serde_json::from_str(r#"{"code":"server_error"}"#).unwrap();
        assert_eq!(err.code.as_deref(), Some("server_error"));
        assert!(err.message.is_none());
    }
}
