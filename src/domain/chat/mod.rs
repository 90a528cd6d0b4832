//! Chat domain - the vocabulary shared by the relay endpoints and the
//! conversation client.

mod citation;
mod message;
mod phase;
mod run_status;

pub use citation::strip_citations;
pub use message::{ChatMessage, ChatRole};
pub use phase::ClientPhase;
pub use run_status::{RunError, RunStatus};
