//! Databot - chat relay for a hosted data warehouse assistant
//!
//! This crate relays user questions to an OpenAI assistant: it allocates a
//! conversation thread, appends each message, runs the assistant, polls the
//! run to completion and returns the reply with citation markers removed.
//! A conversation client models the browser's side of the exchange.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
