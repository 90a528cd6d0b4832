//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Assistants API client and its scripted mock
//! - `http` - REST endpoints and the relay client

pub mod ai;
pub mod http;
