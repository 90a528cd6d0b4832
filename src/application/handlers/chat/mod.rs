//! Chat relay handlers.
//!
//! - `CheckConfigurationHandler` - reports whether credentials are present
//! - `CreateThreadHandler` - allocates a conversation thread
//! - `SendMessageHandler` - appends a message, runs the assistant, returns its reply

mod check_configuration;
mod create_thread;
mod error;
mod send_message;
mod settings;

pub use check_configuration::CheckConfigurationHandler;
pub use create_thread::CreateThreadHandler;
pub use error::ChatError;
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use settings::ChatSettings;
