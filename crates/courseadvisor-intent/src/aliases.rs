//! Department alias table: user shorthand → dataset subject name.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shorthand / variant → canonical subject, in table order.
pub const SUBJECT_ALIASES: &[(&str, &str)] = &[
    // cores
    ("cs", "COMPUTER SCIENCE"),
    ("csci", "COMPUTER SCIENCE"),
    ("comp sci", "COMPUTER SCIENCE"),
    ("computer science", "COMPUTER SCIENCE"),
    ("engl", "ENGLISH"),
    ("english", "ENGLISH"),
    ("math", "MATHEMATICS"),
    ("mathematics", "MATHEMATICS"),
    ("phys", "PHYSICS"),
    ("physics", "PHYSICS"),
    ("bio", "BIOLOGY"),
    ("biology", "BIOLOGY"),
    ("chem", "CHEMISTRY"),
    ("chemistry", "CHEMISTRY"),
    ("phil", "PHILOSOPHY"),
    ("philosophy", "PHILOSOPHY"),
    ("econ", "ECONOMICS"),
    ("economics", "ECONOMICS"),
    ("soci", "SOCIOLOGY"),
    ("sociology", "SOCIOLOGY"),
    ("psych", "PSYCHOLOGY"),
    ("psychology", "PSYCHOLOGY"),
    ("hist", "HISTORY"),
    ("history", "HISTORY"),
    // programs
    ("data", "DATA SCIENCE"),
    ("data science", "DATA SCIENCE"),
    ("is", "INFORMATION SYSTEMS (INFO)"),
    ("info", "INFORMATION SYSTEMS (INFO)"),
    ("information systems", "INFORMATION SYSTEMS (INFO)"),
    ("spaud", "SPEECH PATHOLOGY & AUDIOLOGY"),
    ("nursing", "NURSING"),
    ("comm", "COMMUNICATION"),
    ("communication", "COMMUNICATION"),
    ("pe", "PHYSICAL EDUCATION & RECREATION"),
    ("kines", "KINESIOLOGY"),
    ("kinesiology", "KINESIOLOGY"),
    ("bus", "BUSINESS"),
    ("business", "BUSINESS"),
    ("acct", "ACCOUNTING"),
    ("accounting", "ACCOUNTING"),
    ("stats", "STATISTICS"),
    ("statistics", "STATISTICS"),
    ("religion", "RELIGION"),
    ("music", "MUSIC"),
    ("studio art", "STUDIO ART"),
    ("art", "ART"),
    ("art history", "ART HISTORY"),
    ("theatre", "THEATRE"),
    ("theater", "THEATRE"),
    ("spanish", "SPANISH"),
    ("german", "GERMAN"),
    ("french", "FRENCH"),
    ("dutch", "DUTCH"),
    ("chinese", "CHINESE"),
    ("korean", "KOREAN"),
    ("geology", "GEOLOGY & GEOGRAPHY"),
    ("geography", "GEOLOGY & GEOGRAPHY"),
    ("env studies", "ENVIRONMENTAL STUDIES"),
    ("environmental studies", "ENVIRONMENTAL STUDIES"),
    ("public health", "PUBLIC HEALTH"),
    ("politics", "POLITICS"),
    ("finance", "FINANCE"),
    ("marketing", "MARKETING"),
    ("management", "MANAGEMENT"),
    ("supply chain", "SUPPLY CHAIN MANAGEMENT"),
    ("ministry leadership", "MINISTRY LEADERSHIP"),
    ("biochem", "BIOCHEMISTRY"),
    ("biochemistry", "BIOCHEMISTRY"),
    ("astronomy", "ASTRONOMY"),
    ("calvin core", "CALVIN CORE"),
];

/// Whole-word matchers, longest key first. Equal-length keys keep table order.
static ALIAS_MATCHERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let mut aliases: Vec<_> = SUBJECT_ALIASES.to_vec();
    aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    aliases
        .into_iter()
        .map(|(key, canonical)| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(key))).unwrap();
            (re, canonical)
        })
        .collect()
});

/// Canonical subject mentioned in `text` via an alias, if any.
pub fn normalize_department(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    ALIAS_MATCHERS
        .iter()
        .find(|(re, _)| re.is_match(&lowered))
        .map(|(_, canonical)| *canonical)
}

/// Every distinct canonical subject name.
pub fn canonical_departments() -> impl Iterator<Item = &'static str> {
    let mut seen = Vec::new();
    SUBJECT_ALIASES.iter().filter_map(move |(_, canonical)| {
        if seen.contains(canonical) {
            None
        } else {
            seen.push(*canonical);
            Some(*canonical)
        }
    })
}

/// Whether `name` is a canonical subject, compared verbatim.
pub fn is_canonical_department(name: &str) -> bool {
    canonical_departments().any(|canonical| canonical == name)
}
