//! Intent resolution: maps one free-text utterance to at most one
//! capability call.
//!
//! Signals (department, level, time of day) are extracted first; an ordered
//! rule list then picks the call, first match wins.

pub mod aliases;
pub mod resolver;
pub mod signals;

pub use aliases::{canonical_departments, is_canonical_department, normalize_department, SUBJECT_ALIASES};
pub use resolver::{IntentResolver, Rule, Utterance, RULES};
pub use signals::Signals;
