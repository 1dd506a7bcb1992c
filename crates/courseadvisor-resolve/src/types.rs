//! Capability calls and result shapes.
//!
//! Calls travel as `{"tool": <name>, "args": {...}}`; results are either a
//! list of rows or a single object.

use courseadvisor_core::{Capability, Error, Result};
use courseadvisor_store::Section;
use serde::{Deserialize, Deserializer, Serialize};

/// Default row cap for the combined filter when the caller gives none.
pub const DEFAULT_FILTER_LIMIT: usize = 50;

fn default_limit() -> usize {
    DEFAULT_FILTER_LIMIT
}

/// Accepts a missing/null limit (default) and clamps anything below 1 to 1.
fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let limit = Option::<i64>::deserialize(deserializer)?;
    Ok(limit.map_or(DEFAULT_FILTER_LIMIT, |n| n.max(1) as usize))
}

/// Arguments of the combined filter. Absent (or blank) predicates are
/// always-true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterArgs {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: usize,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            query: None,
            department: None,
            level: None,
            time_of_day: None,
            limit: DEFAULT_FILTER_LIMIT,
        }
    }
}

/// One capability invocation: which capability, with which arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "args", rename_all = "snake_case")]
pub enum CapabilityCall {
    FindCourses { query: String },
    FindSections { course_title: String },
    FindSectionsByDepartment { department: String },
    FindSectionsByLevel { level: String },
    FindSectionsByTime { time_of_day: String },
    GetSectionDetails { section_id: String },
    FindSectionsFiltered(FilterArgs),
}

impl CapabilityCall {
    /// Build a call from a capability name and a flat argument object.
    pub fn from_parts(name: &str, args: serde_json::Value) -> Result<Self> {
        let capability: Capability = name.parse()?;
        let args = match args {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        serde_json::from_value(serde_json::json!({ "tool": capability.name(), "args": args }))
            .map_err(|e| Error::InvalidArguments(format!("{}: {}", capability, e)))
    }

    pub fn capability(&self) -> Capability {
        match self {
            Self::FindCourses { .. } => Capability::FindCourses,
            Self::FindSections { .. } => Capability::FindSections,
            Self::FindSectionsByDepartment { .. } => Capability::FindSectionsByDepartment,
            Self::FindSectionsByLevel { .. } => Capability::FindSectionsByLevel,
            Self::FindSectionsByTime { .. } => Capability::FindSectionsByTime,
            Self::GetSectionDetails { .. } => Capability::GetSectionDetails,
            Self::FindSectionsFiltered(_) => Capability::FindSectionsFiltered,
        }
    }

    /// The flat argument object of this call.
    pub fn args(&self) -> serde_json::Value {
        serde_json::to_value(self)
            .ok()
            .and_then(|mut v| v.get_mut("args").map(serde_json::Value::take))
            .unwrap_or_default()
    }
}

/// Text-search row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMatch {
    #[serde(rename = "section_id")]
    pub id: String,
    #[serde(rename = "section_name")]
    pub name: String,
    #[serde(rename = "course_title")]
    pub title: String,
    pub department: String,
    pub level: String,
    pub time: String,
}

/// Title-search and department-filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMatch {
    #[serde(rename = "section_id")]
    pub id: String,
    #[serde(rename = "section_name")]
    pub name: String,
    #[serde(rename = "course_title")]
    pub title: String,
    pub time: String,
}

/// Level- and time-filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBrief {
    #[serde(rename = "section_id")]
    pub id: String,
    #[serde(rename = "section_name")]
    pub name: String,
    #[serde(rename = "course_title")]
    pub title: String,
}

/// Combined-filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredSection {
    #[serde(rename = "section_id")]
    pub id: String,
    #[serde(rename = "section_name")]
    pub name: String,
    #[serde(rename = "course_title")]
    pub title: String,
    pub department: String,
    pub level: String,
    pub time: String,
    /// First 220 characters of the description, `…` when truncated.
    pub preview: String,
}

/// Id-lookup miss. A normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFound {
    pub error: String,
    pub section_id: String,
}

impl NotFound {
    pub fn new(section_id: impl Into<String>) -> Self {
        Self {
            error: "not found".into(),
            section_id: section_id.into(),
        }
    }
}

/// Id-lookup result: the full raw record, or an explicit miss.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionDetails {
    Found(Section),
    NotFound(NotFound),
}

/// Result of a capability invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CapabilityOutput {
    Courses(Vec<CourseMatch>),
    Sections(Vec<SectionMatch>),
    Briefs(Vec<SectionBrief>),
    Filtered(Vec<FilteredSection>),
    Details(SectionDetails),
}

/// Uniform borrowed view over any result row, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub title: &'a str,
    pub time: Option<&'a str>,
}

impl CapabilityOutput {
    /// Rows of a list result; `None` for a single-record result.
    pub fn rows(&self) -> Option<Vec<ResultRow<'_>>> {
        let rows = match self {
            Self::Courses(rows) => rows
                .iter()
                .map(|r| ResultRow { id: &r.id, name: &r.name, title: &r.title, time: Some(&r.time) })
                .collect(),
            Self::Sections(rows) => rows
                .iter()
                .map(|r| ResultRow { id: &r.id, name: &r.name, title: &r.title, time: Some(&r.time) })
                .collect(),
            Self::Briefs(rows) => rows
                .iter()
                .map(|r| ResultRow { id: &r.id, name: &r.name, title: &r.title, time: None })
                .collect(),
            Self::Filtered(rows) => rows
                .iter()
                .map(|r| ResultRow { id: &r.id, name: &r.name, title: &r.title, time: Some(&r.time) })
                .collect(),
            Self::Details(_) => return None,
        };
        Some(rows)
    }

    /// Number of rows, or 1 for a single-record result.
    pub fn len(&self) -> usize {
        match self {
            Self::Courses(rows) => rows.len(),
            Self::Sections(rows) => rows.len(),
            Self::Briefs(rows) => rows.len(),
            Self::Filtered(rows) => rows.len(),
            Self::Details(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
