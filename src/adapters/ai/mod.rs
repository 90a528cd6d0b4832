//! Assistant Service Adapters.
//!
//! Implementations of the AssistantService port.
//!
//! ## Available Adapters
//!
//! - `OpenAIAssistantsService` - OpenAI Assistants API (v2)
//! - `MockAssistantService` - Scripted mock for testing

mod mock_assistant;
mod openai_assistants;

pub use mock_assistant::{MockAssistantService, MockCall, MockError, MockOperation};
pub use openai_assistants::{OpenAIAssistantsConfig, OpenAIAssistantsService};
