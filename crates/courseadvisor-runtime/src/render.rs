//! Reply text for capability results.

use std::time::Duration;

use courseadvisor_resolve::normalize::keys;
use courseadvisor_resolve::{CapabilityOutput, ResultRow, SectionDetails};
use courseadvisor_store::Section;

/// Rows shown in a list reply.
pub const LIST_PREVIEW_ROWS: usize = 5;
/// Description characters shown in a details reply.
pub const DETAILS_DESCRIPTION_CHARS: usize = 600;

pub const NO_RESULTS: &str = "No results matched. Try adding a keyword, department, or level.";
pub const NOT_FOUND: &str = "Hmm, I couldn't find that section id. Double-check and try again.";
pub const CLARIFY: &str = "Do you want to search by *interest* (e.g., 'AI', 'ethics'), \
*department* (e.g., 'computer science', 'english'), or *constraints* (e.g., '300-level morning')?";
pub const REFINE_HINT: &str =
    "Ask for details with: details <section_id> or refine: 'morning 300-level computer science'";

/// Reply for any capability result.
pub fn render_output(output: &CapabilityOutput, elapsed: Duration) -> String {
    match output {
        CapabilityOutput::Details(SectionDetails::Found(section)) => render_details(section),
        CapabilityOutput::Details(SectionDetails::NotFound(_)) => NOT_FOUND.to_string(),
        list => render_rows(&list.rows().unwrap_or_default(), elapsed),
    }
}

/// Match count and latency, the first few rows, and a refinement hint.
pub fn render_rows(rows: &[ResultRow<'_>], elapsed: Duration) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }
    let mut lines = Vec::with_capacity(LIST_PREVIEW_ROWS + 2);
    lines.push(format!(
        "Found {} match(es) in {:.2}s. Here are a few:",
        rows.len(),
        elapsed.as_secs_f64()
    ));
    for row in rows.iter().take(LIST_PREVIEW_ROWS) {
        lines.push(format!(
            "- {} — {} [{}] (id={})",
            row.name,
            row.title,
            row.time.unwrap_or("?"),
            row.id
        ));
    }
    lines.push(REFINE_HINT.to_string());
    lines.join("\n")
}

/// Name and title, meeting time, then the head of the description.
pub fn render_details(section: &Section) -> String {
    let or = |value: String, placeholder: &str| {
        if value.is_empty() {
            placeholder.to_string()
        } else {
            value
        }
    };
    let name = or(section.first_text(keys::SECTION_NAME), "(unknown)");
    let title = or(section.first_text(keys::TITLE), "(untitled)");
    let when = or(section.first_text(keys::MEETING_PATTERN), "(time n/a)");
    let description: String = section
        .first_text(keys::DESCRIPTION)
        .chars()
        .take(DETAILS_DESCRIPTION_CHARS)
        .collect();
    format!("{} — {}\nTime: {}\n\n{}", name, title, when, description)
}
