//! Cue extraction from a single utterance.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::aliases::{is_canonical_department, normalize_department};

/// A capitalized run, e.g. a subject typed verbatim as `COMPUTER SCIENCE`.
static SUBJECT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z][A-Za-z&\s]+)\b").unwrap());
static LEVEL_HUNDRED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-4])00\b").unwrap());
static LEVEL_XX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-4])\s*xx\b").unwrap());

const TIME_WORDS: [&str; 3] = ["morning", "afternoon", "evening"];

/// Department, level and time-of-day cues found in an utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub department: Option<String>,
    /// `"100"`..`"400"`.
    pub level: Option<String>,
    pub time_of_day: Option<String>,
}

impl Signals {
    pub fn extract(utterance: &str) -> Self {
        let lowered = utterance.to_lowercase();
        Self {
            department: department_of(utterance),
            level: level_of(&lowered),
            time_of_day: time_of_day_of(&lowered),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.level.is_none() && self.time_of_day.is_none()
    }
}

/// Alias lookup first; otherwise the first capitalized run, if it names a
/// subject exactly.
fn department_of(utterance: &str) -> Option<String> {
    if let Some(canonical) = normalize_department(utterance) {
        return Some(canonical.to_string());
    }
    let caps = SUBJECT_RUN_RE.captures(utterance)?;
    let candidate = caps[1].trim().to_uppercase();
    is_canonical_department(&candidate).then_some(candidate)
}

fn level_of(lowered: &str) -> Option<String> {
    LEVEL_HUNDRED_RE
        .captures(lowered)
        .or_else(|| LEVEL_XX_RE.captures(lowered))
        .map(|caps| format!("{}00", &caps[1]))
}

fn time_of_day_of(lowered: &str) -> Option<String> {
    TIME_WORDS
        .iter()
        .find(|word| lowered.contains(*word))
        .map(|word| word.to_string())
}
