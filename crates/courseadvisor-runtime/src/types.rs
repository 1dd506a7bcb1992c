//! Runtime types.

use courseadvisor_resolve::{CapabilityCall, CapabilityOutput};
use serde::Serialize;

/// Persona line recorded at the start of every session.
pub const SYSTEM_PROMPT: &str = "You are Course Advisor Bot 2.0 — a friendly, pragmatic advisor. \
Maintain context, ask concise clarifying questions when constraints are ambiguous, and call tools \
to fetch section-level results. Prefer a small, relevant set with clear next steps.";

/// Speaker of a conversation log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One JSONL line of the conversation log.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent<'a> {
    /// RFC 3339, UTC.
    pub ts: String,
    pub role: Role,
    pub text: &'a str,
    pub meta: serde_json::Value,
}

/// Outcome of one advisor turn.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorReply {
    /// Rendered reply text.
    pub text: String,
    /// The call that was executed, after fallback; `None` when the
    /// utterance was not actionable.
    pub call: Option<CapabilityCall>,
    /// Raw capability result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<CapabilityOutput>,
    #[serde(rename = "latencyMs")]
    pub latency_ms: f64,
}
