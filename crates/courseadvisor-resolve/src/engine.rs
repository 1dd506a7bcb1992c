//! Query engine: the section capabilities over the shared record set.

use std::sync::Arc;

use courseadvisor_store::Section;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::normalize::NormalizedSection;
use crate::time_bucket::TimeBucket;
use crate::types::*;

/// Characters of description kept in a combined-filter preview.
pub const PREVIEW_CHARS: usize = 220;

static LEVEL_HUNDREDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s*00").unwrap());
static LEVEL_XX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d)\s*xx").unwrap());
static LEVEL_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)level\s*(\d)").unwrap());

/// Canonical `"{d}00"` level from loose text (`"200"`, `"3xx"`, `"level 4"`,
/// `"sophomore 2"`). `None` when the text has no digit at all.
pub fn parse_level(text: &str) -> Option<String> {
    let digit = [&*LEVEL_HUNDREDS_RE, &*LEVEL_XX_RE, &*LEVEL_WORD_RE]
        .iter()
        .find_map(|re| re.captures(text).map(|c| c[1].to_string()))
        .or_else(|| text.chars().find(|c| c.is_ascii_digit()).map(String::from))?;
    Some(format!("{}00", digit))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Uppercase equality or prefix. `code` must already be uppercased.
fn department_matches(department: &str, code: &str) -> bool {
    let department = department.to_uppercase();
    department == code || department.starts_with(code)
}

fn preview(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

/// Non-blank trimmed value of an optional argument.
fn present(arg: &Option<String>) -> Option<&str> {
    arg.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Read-only query engine over an injected record set.
#[derive(Clone)]
pub struct QueryEngine {
    sections: Arc<Vec<Section>>,
}

impl QueryEngine {
    pub fn new(sections: Arc<Vec<Section>>) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn normalized(&self) -> impl Iterator<Item = NormalizedSection<'_>> {
        self.sections.iter().map(NormalizedSection::new)
    }

    /// Dispatch a capability call.
    pub fn invoke(&self, call: &CapabilityCall) -> CapabilityOutput {
        let output = match call {
            CapabilityCall::FindCourses { query } => CapabilityOutput::Courses(self.find_courses(query)),
            CapabilityCall::FindSections { course_title } => {
                CapabilityOutput::Sections(self.find_sections(course_title))
            }
            CapabilityCall::FindSectionsByDepartment { department } => {
                CapabilityOutput::Sections(self.find_sections_by_department(department))
            }
            CapabilityCall::FindSectionsByLevel { level } => {
                CapabilityOutput::Briefs(self.find_sections_by_level(level))
            }
            CapabilityCall::FindSectionsByTime { time_of_day } => {
                CapabilityOutput::Briefs(self.find_sections_by_time(time_of_day))
            }
            CapabilityCall::GetSectionDetails { section_id } => {
                CapabilityOutput::Details(self.get_section_details(section_id))
            }
            CapabilityCall::FindSectionsFiltered(args) => {
                CapabilityOutput::Filtered(self.find_sections_filtered(args))
            }
        };
        debug!("{} -> {} result(s)", call.capability(), output.len());
        output
    }

    /// Case-insensitive substring search over `title + "\n" + description`.
    pub fn find_courses(&self, query: &str) -> Vec<CourseMatch> {
        let query = query.trim();
        self.normalized()
            .filter(|s| contains_ci(&format!("{}\n{}", s.title(), s.description()), query))
            .map(|s| CourseMatch {
                id: s.id(),
                name: s.name(),
                title: s.title(),
                department: s.department(),
                level: s.level(),
                time: s.time(),
            })
            .collect()
    }

    /// Case-insensitive substring search over the title only.
    pub fn find_sections(&self, course_title: &str) -> Vec<SectionMatch> {
        let fragment = course_title.trim();
        self.normalized()
            .filter(|s| contains_ci(&s.title(), fragment))
            .map(section_match)
            .collect()
    }

    /// Department code, uppercase exact or prefix match (`"CS"` also
    /// matches `"CSCI"`).
    pub fn find_sections_by_department(&self, department: &str) -> Vec<SectionMatch> {
        let code = department.trim().to_uppercase();
        self.normalized()
            .filter(|s| department_matches(&s.department(), &code))
            .map(section_match)
            .collect()
    }

    /// Level filter. Text without any digit compares against the unknown
    /// level `""`.
    pub fn find_sections_by_level(&self, level: &str) -> Vec<SectionBrief> {
        let level = parse_level(level).unwrap_or_default();
        self.normalized()
            .filter(|s| s.level() == level)
            .map(section_brief)
            .collect()
    }

    /// Time-of-day filter. Unknown bucket names match nothing.
    pub fn find_sections_by_time(&self, time_of_day: &str) -> Vec<SectionBrief> {
        let Some(bucket) = TimeBucket::parse(time_of_day) else {
            return Vec::new();
        };
        self.normalized()
            .filter(|s| bucket.matches(&s.time()))
            .map(section_brief)
            .collect()
    }

    /// Full raw record for a synthesized id; the first match wins.
    pub fn get_section_details(&self, section_id: &str) -> SectionDetails {
        let section_id = section_id.trim();
        self.normalized()
            .find(|s| s.id() == section_id)
            .map(|s| SectionDetails::Found(s.raw().clone()))
            .unwrap_or_else(|| SectionDetails::NotFound(NotFound::new(section_id)))
    }

    /// AND of every provided predicate, stopping after `max(1, limit)` rows.
    pub fn find_sections_filtered(&self, args: &FilterArgs) -> Vec<FilteredSection> {
        let query = present(&args.query);
        let department = present(&args.department).map(str::to_uppercase);
        let level = present(&args.level).and_then(parse_level);
        let bucket = present(&args.time_of_day).and_then(|name| {
            let bucket = TimeBucket::parse(name);
            if bucket.is_none() {
                warn!("Ignoring unrecognized time_of_day {:?}", name);
            }
            bucket
        });
        let limit = args.limit.max(1);

        self.normalized()
            .filter_map(|s| {
                let title = s.title();
                let description = s.description();
                if let Some(q) = query {
                    if !contains_ci(&format!("{}\n{}", title, description), q) {
                        return None;
                    }
                }
                let section_department = s.department();
                if let Some(code) = &department {
                    if !department_matches(&section_department, code) {
                        return None;
                    }
                }
                let section_level = s.level();
                if let Some(level) = &level {
                    if &section_level != level {
                        return None;
                    }
                }
                let time = s.time();
                if let Some(bucket) = bucket {
                    if !bucket.matches(&time) {
                        return None;
                    }
                }
                Some(FilteredSection {
                    id: s.id(),
                    name: s.name(),
                    preview: preview(&description),
                    title,
                    department: section_department,
                    level: section_level,
                    time,
                })
            })
            .take(limit)
            .collect()
    }
}

fn section_match(s: NormalizedSection<'_>) -> SectionMatch {
    SectionMatch {
        id: s.id(),
        name: s.name(),
        title: s.title(),
        time: s.time(),
    }
}

fn section_brief(s: NormalizedSection<'_>) -> SectionBrief {
    SectionBrief {
        id: s.id(),
        name: s.name(),
        title: s.title(),
    }
}
