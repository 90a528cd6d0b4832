//! Strongly-typed identifier value objects.
//!
//! All identifiers here are opaque strings issued by the hosted assistant
//! service (`thread_...`, `run_...`, `asst_...`). They are never generated
//! locally, only validated as non-empty and passed back verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a conversation thread held by the assistant service.
    ThreadId,
    "thread_id"
);

opaque_id!(
    /// Identifier of one assistant run against a thread.
    RunId,
    "run_id"
);

opaque_id!(
    /// Identifier of the configured hosted assistant.
    AssistantId,
    "assistant_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_id_accepts_vendor_format() {
        let id = ThreadId::new("thread_abc").unwrap();
        assert_eq!(id.as_str(), "thread_abc");
        assert_eq!(id.to_string(), "thread_abc");
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert_eq!(
            ThreadId::new(""),
            Err(ValidationError::empty_field("thread_id"))
        );
        assert_eq!(RunId::new("   "), Err(ValidationError::empty_field("run_id")));
        assert!(AssistantId::new("").is_err());
    }

    #[test]
    fn ids_parse_from_str() {
        let id: AssistantId = "asst_123".parse().unwrap();
        assert_eq!(id.into_inner(), "asst_123");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = RunId::new("run_42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"run_42\"");

        let back: RunId = serde_json::from_str("\"run_42\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn blank_ids_fail_to_deserialize() {
        assert!(serde_json::from_str::<ThreadId>("\"\"").is_err());
        assert!(serde_json::from_str::<AssistantId>("\"  \"").is_err());
    }
}
