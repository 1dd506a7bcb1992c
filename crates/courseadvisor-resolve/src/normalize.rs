//! Canonical fields derived from loosely-typed section records.
//!
//! Source datasets disagree on key names, so each logical field reads an
//! ordered list of accepted keys and takes the first non-blank value.

use courseadvisor_store::Section;

/// Accepted keys per logical field, in priority order.
pub mod keys {
    pub const SUBJECT: &[&str] = &["Subject", "subject"];
    pub const COURSE_NUMBER: &[&str] = &["Crs_Number", "CrsNumber", "CourseNumber", "course_number"];
    pub const SECTION_NUMBER: &[&str] = &["Sec_Number", "SecNumber", "SectionNumber", "section_number"];
    pub const SECTION_NAME: &[&str] = &["Section_Name", "SectionName", "section_name"];
    pub const TITLE: &[&str] = &["Section_Title", "CourseTitle", "course_title", "Title", "title"];
    pub const DESCRIPTION: &[&str] = &["Desc", "CourseDescription", "description", "Description"];
    pub const DEPARTMENT: &[&str] = &["Subject", "Department", "department"];
    pub const LEVEL: &[&str] = &["AcadLevel", "AcademicLevel", "acad_level"];
    pub const MEETING_PATTERN: &[&str] = &["MtgPattern", "MeetingPattern", "MeetingTime", "meeting_time"];
    pub const START_DATE: &[&str] = &["StartDt", "StartDate"];
    pub const END_DATE: &[&str] = &["EndDt", "EndDate"];
    pub const PERIOD_REF: &[&str] = &["Period_RefID", "PeriodRefId", "period_ref_id"];
}

/// Read-only normalized view over a raw section. Every accessor is
/// computed on demand and never fails.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedSection<'a> {
    raw: &'a Section,
}

impl<'a> NormalizedSection<'a> {
    pub fn new(raw: &'a Section) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a Section {
        self.raw
    }

    /// Synthesized identity: `"{Subject} {CrsNumber}-{SecNumber}"` when all
    /// three are present, else the section name, else `"{Title}|{PeriodRef}"`.
    pub fn id(&self) -> String {
        let subject = self.raw.first_text(keys::SUBJECT);
        let number = self.raw.first_text(keys::COURSE_NUMBER);
        let section = self.raw.first_text(keys::SECTION_NUMBER);
        if !subject.is_empty() && !number.is_empty() && !section.is_empty() {
            return format!("{} {}-{}", subject, number, section);
        }

        let name = self.raw.first_text(keys::SECTION_NAME);
        if !name.is_empty() {
            return name;
        }

        format!(
            "{}|{}",
            self.raw.first_text(keys::TITLE),
            self.raw.first_text(keys::PERIOD_REF)
        )
    }

    /// Display name: the section name, else the `Subject Num-Sec` composition.
    pub fn name(&self) -> String {
        let name = self.raw.first_text(keys::SECTION_NAME);
        if !name.is_empty() {
            return name;
        }
        format!(
            "{} {}-{}",
            self.raw.first_text(keys::SUBJECT),
            self.raw.first_text(keys::COURSE_NUMBER),
            self.raw.first_text(keys::SECTION_NUMBER)
        )
        .trim()
        .to_string()
    }

    pub fn title(&self) -> String {
        self.raw.first_text(keys::TITLE)
    }

    pub fn description(&self) -> String {
        self.raw.first_text(keys::DESCRIPTION)
    }

    pub fn department(&self) -> String {
        self.raw.first_text(keys::DEPARTMENT)
    }

    /// `"100"`..`"400"`, or `""` when unknown.
    ///
    /// An explicit level is used only when it is exactly `[1-4]00`;
    /// otherwise the first digit of the course number decides, and only
    /// digits 1-4 map to a level.
    pub fn level(&self) -> String {
        let explicit = self.raw.first_text(keys::LEVEL);
        if is_canonical_level(&explicit) {
            return explicit;
        }

        self.raw
            .first_text(keys::COURSE_NUMBER)
            .chars()
            .find(|c| c.is_ascii_digit())
            .filter(|c| ('1'..='4').contains(c))
            .map(|d| format!("{}00", d))
            .unwrap_or_default()
    }

    /// Meeting pattern, else `"{start} – {end}"` with stray separators trimmed.
    pub fn time(&self) -> String {
        let pattern = self.raw.first_text(keys::MEETING_PATTERN);
        if !pattern.is_empty() {
            return pattern;
        }
        let start = self.raw.first_text(keys::START_DATE);
        let end = self.raw.first_text(keys::END_DATE);
        format!("{} – {}", start, end)
            .trim_matches(|c| c == ' ' || c == '–')
            .to_string()
    }
}

/// Whether `level` is one of `"100"`, `"200"`, `"300"`, `"400"`.
pub fn is_canonical_level(level: &str) -> bool {
    matches!(level, "100" | "200" | "300" | "400")
}
