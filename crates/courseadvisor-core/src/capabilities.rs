//! Query capability catalogue and availability sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One named query operation exposed by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Text search over title + description.
    FindCourses,
    /// Substring search over the title only.
    FindSections,
    /// Department code, exact or prefix.
    FindSectionsByDepartment,
    /// Hundred-level tier.
    FindSectionsByLevel,
    /// Morning / afternoon / evening bucket.
    FindSectionsByTime,
    /// Raw record lookup by synthesized id.
    GetSectionDetails,
    /// AND of query, department, level and time-of-day, capped by a limit.
    FindSectionsFiltered,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Self::FindCourses,
        Self::FindSections,
        Self::FindSectionsByDepartment,
        Self::FindSectionsByLevel,
        Self::FindSectionsByTime,
        Self::GetSectionDetails,
        Self::FindSectionsFiltered,
    ];

    /// Wire name used at the invocation boundary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FindCourses => "find_courses",
            Self::FindSections => "find_sections",
            Self::FindSectionsByDepartment => "find_sections_by_department",
            Self::FindSectionsByLevel => "find_sections_by_level",
            Self::FindSectionsByTime => "find_sections_by_time",
            Self::GetSectionDetails => "get_section_details",
            Self::FindSectionsFiltered => "find_sections_filtered",
        }
    }

    /// Short description shown to tool-listing clients.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FindCourses => "Text search over section title and description (e.g. \"AI\", \"ethics\").",
            Self::FindSections => "Sections whose title contains the given string (case-insensitive).",
            Self::FindSectionsByDepartment => {
                "Filter by department/subject code; prefix match, so \"CS\" also finds \"CSCI\"."
            }
            Self::FindSectionsByLevel => "Filter by level (\"100\"-\"400\", or \"1xx\"/\"3xx\").",
            Self::FindSectionsByTime => {
                "Filter by time bucket: morning (06:00-11:59), afternoon (12:00-17:00), evening (17:01-22:59)."
            }
            Self::GetSectionDetails => "Raw section record for a synthesized id such as \"ENGL 300-A\".",
            Self::FindSectionsFiltered => "Combined filter over query, department, level and time_of_day.",
        }
    }

    /// Argument names accepted by this capability.
    pub fn arguments(&self) -> &'static [&'static str] {
        match self {
            Self::FindCourses => &["query"],
            Self::FindSections => &["course_title"],
            Self::FindSectionsByDepartment => &["department"],
            Self::FindSectionsByLevel => &["level"],
            Self::FindSectionsByTime => &["time_of_day"],
            Self::GetSectionDetails => &["section_id"],
            Self::FindSectionsFiltered => &["query", "department", "level", "time_of_day", "limit"],
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCapability(s.to_string()))
    }
}

/// The set of capabilities a connected caller can invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Every capability the engine implements.
    pub fn all() -> Self {
        Self(Capability::ALL.into_iter().collect())
    }

    /// Copy of this set with one capability removed.
    pub fn without(&self, capability: Capability) -> Self {
        let mut set = self.0.clone();
        set.remove(&capability);
        Self(set)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::all()
    }
}
