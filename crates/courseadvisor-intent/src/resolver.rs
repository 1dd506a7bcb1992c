//! Ordered intent rules and the resolver that applies them.

use courseadvisor_resolve::{CapabilityCall, FilterArgs};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::signals::Signals;

static SECTION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{2,10}\s*\d{2,3}-[A-Z0-9]{1,3})\b").unwrap());
static NUMERIC_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{5,})\b").unwrap());
static TOPIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(ai|data|ethics|security|writing|theatre|music|history|global|justice|psychology|network|biology|chemistry)\b",
    )
    .unwrap()
});

const DETAIL_CUES: [&str; 3] = ["details", "tell me more", "id "];

/// One utterance, pre-processed once for every rule.
#[derive(Debug, Clone)]
pub struct Utterance<'a> {
    pub text: &'a str,
    pub lowered: String,
    pub signals: Signals,
    /// Row cap for combined-filter calls.
    pub limit: usize,
}

impl<'a> Utterance<'a> {
    pub fn new(text: &'a str, limit: usize) -> Self {
        Self {
            text,
            lowered: text.to_lowercase(),
            signals: Signals::extract(text),
            limit,
        }
    }
}

/// A named intent rule.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Utterance<'_>) -> Option<CapabilityCall>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Intent rules in evaluation order; the first that fires wins.
pub const RULES: &[Rule] = &[
    Rule { name: "section_details", apply: section_details },
    Rule { name: "combined_filter", apply: combined_filter },
    Rule { name: "topical_search", apply: topical_search },
];

fn section_details(u: &Utterance<'_>) -> Option<CapabilityCall> {
    if !DETAIL_CUES.iter().any(|cue| u.lowered.contains(cue)) {
        return None;
    }
    let caps = SECTION_ID_RE
        .captures(u.text)
        .or_else(|| NUMERIC_ID_RE.captures(&u.lowered))?;
    Some(CapabilityCall::GetSectionDetails {
        section_id: caps[1].trim().to_string(),
    })
}

fn combined_filter(u: &Utterance<'_>) -> Option<CapabilityCall> {
    if u.signals.is_empty() {
        return None;
    }
    Some(CapabilityCall::FindSectionsFiltered(FilterArgs {
        query: None,
        department: u.signals.department.clone(),
        level: u.signals.level.clone(),
        time_of_day: u.signals.time_of_day.clone(),
        limit: u.limit.max(1),
    }))
}

fn topical_search(u: &Utterance<'_>) -> Option<CapabilityCall> {
    TOPIC_RE.is_match(&u.lowered).then(|| CapabilityCall::FindCourses {
        query: u.text.to_string(),
    })
}

/// Stateless utterance → capability-call mapper.
#[derive(Debug, Clone)]
pub struct IntentResolver {
    limit: usize,
}

impl IntentResolver {
    pub fn new(limit: usize) -> Self {
        Self { limit: limit.max(1) }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The call for `text`, or `None` when nothing in it is actionable.
    pub fn resolve(&self, text: &str) -> Option<CapabilityCall> {
        self.resolve_with_rule(text).map(|(_, call)| call)
    }

    /// Like [`resolve`](Self::resolve), also naming the rule that fired.
    pub fn resolve_with_rule(&self, text: &str) -> Option<(&'static str, CapabilityCall)> {
        let utterance = Utterance::new(text, self.limit);
        let hit = RULES
            .iter()
            .find_map(|rule| (rule.apply)(&utterance).map(|call| (rule.name, call)));
        match &hit {
            Some((rule, call)) => debug!(rule, tool = %call.capability(), "Intent resolved"),
            None => debug!(signals = ?utterance.signals, "No intent"),
        }
        hit
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> Option<CapabilityCall> {
        IntentResolver::default().resolve(text)
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["section_details", "combined_filter", "topical_search"]);
    }

    #[test]
    fn test_topical_search_keeps_whole_utterance() {
        assert_eq!(
            resolve("I want something about AI"),
            Some(CapabilityCall::FindCourses {
                query: "I want something about AI".into()
            })
        );
    }

    #[test]
    fn test_section_details() {
        assert_eq!(
            resolve("details CS 262-01"),
            Some(CapabilityCall::GetSectionDetails { section_id: "CS 262-01".into() })
        );
        assert_eq!(
            resolve("tell me more about ENGL 300-A please"),
            Some(CapabilityCall::GetSectionDetails { section_id: "ENGL 300-A".into() })
        );
        assert_eq!(
            resolve("what is id 123456"),
            Some(CapabilityCall::GetSectionDetails { section_id: "123456".into() })
        );
    }

    #[test]
    fn test_details_beats_combined_filter() {
        // "morning" is a time signal, but the details cue fires first.
        let (rule, _) = IntentResolver::default()
            .resolve_with_rule("details on CSCI 262-01 morning")
            .unwrap();
        assert_eq!(rule, "section_details");
    }

    #[test]
    fn test_details_cue_without_id_falls_through() {
        let (rule, call) = IntentResolver::default()
            .resolve_with_rule("more details on computer science")
            .unwrap();
        assert_eq!(rule, "combined_filter");
        match call {
            CapabilityCall::FindSectionsFiltered(args) => {
                assert_eq!(args.department.as_deref(), Some("COMPUTER SCIENCE"))
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_combined_filter() {
        assert_eq!(
            resolve("morning 300-level computer science"),
            Some(CapabilityCall::FindSectionsFiltered(FilterArgs {
                query: None,
                department: Some("COMPUTER SCIENCE".into()),
                level: Some("300".into()),
                time_of_day: Some("morning".into()),
                limit: 20,
            }))
        );
    }

    #[test]
    fn test_combined_filter_uses_configured_limit() {
        let call = IntentResolver::new(5).resolve("evening english").unwrap();
        assert_eq!(
            call,
            CapabilityCall::FindSectionsFiltered(FilterArgs {
                department: Some("ENGLISH".into()),
                time_of_day: Some("evening".into()),
                limit: 5,
                ..Default::default()
            })
        );
        assert_eq!(IntentResolver::new(0).limit(), 1);
    }

    #[test]
    fn test_signal_beats_topic() {
        // "history" is both a topic keyword and a department alias.
        let (rule, _) = IntentResolver::default().resolve_with_rule("history").unwrap();
        assert_eq!(rule, "combined_filter");
    }

    #[test]
    fn test_nothing_actionable() {
        assert_eq!(resolve("hello"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("what should I take?"), None);
    }
}
