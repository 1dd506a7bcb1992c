//! Advisor runtime: turns one utterance into a rendered reply.
//!
//! Resolves intent, rewrites the call for the capabilities actually on
//! offer, runs it against the catalog, and renders the result. Every turn
//! can be appended to a JSONL conversation log.

pub mod advisor;
pub mod compose;
pub mod log;
pub mod render;
pub mod types;

pub use advisor::Advisor;
pub use compose::decompose_for;
pub use log::ConversationLog;
pub use types::*;
