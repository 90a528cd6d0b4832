//! Domain layer containing the chat vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, errors, state machines)
//! - `chat` - Messages, run status, citation stripping and client phases

pub mod chat;
pub mod foundation;
