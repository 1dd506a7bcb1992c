//! Capability fallback: rewrites a call for the capability set on offer.

use courseadvisor_core::{Capability, CapabilitySet};
use courseadvisor_resolve::{CapabilityCall, FilterArgs};
use tracing::debug;

/// The call to run given `available`, or `None` when nothing fits.
///
/// Available calls pass through untouched. A combined filter that is not
/// available collapses to a single-filter call on the first present
/// predicate, by priority query, department, level, time of day; each
/// candidate is taken only if its capability is available. Other
/// constraints are dropped.
pub fn decompose_for(call: CapabilityCall, available: &CapabilitySet) -> Option<CapabilityCall> {
    let capability = call.capability();
    if available.contains(capability) {
        return Some(call);
    }
    let CapabilityCall::FindSectionsFiltered(args) = call else {
        debug!("{} unavailable, no fallback", capability);
        return None;
    };

    let fallback = candidates(args)
        .into_iter()
        .flatten()
        .find(|c| available.contains(c.capability()));
    match &fallback {
        Some(c) => debug!("find_sections_filtered unavailable, falling back to {}", c.capability()),
        None => debug!("find_sections_filtered unavailable, no usable predicate"),
    }
    fallback
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Single-filter rewrites in priority order.
fn candidates(args: FilterArgs) -> [Option<CapabilityCall>; 4] {
    [
        present(args.query).map(|query| CapabilityCall::FindCourses { query }),
        present(args.department).map(|department| CapabilityCall::FindSectionsByDepartment { department }),
        present(args.level).map(|level| CapabilityCall::FindSectionsByLevel { level }),
        present(args.time_of_day).map(|time_of_day| CapabilityCall::FindSectionsByTime { time_of_day }),
    ]
}

/// Capability set without the combined filter, as offered by older
/// catalog services.
pub fn single_filter_set() -> CapabilitySet {
    CapabilitySet::all().without(Capability::FindSectionsFiltered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered(department: Option<&str>, level: Option<&str>, time_of_day: Option<&str>) -> CapabilityCall {
        CapabilityCall::FindSectionsFiltered(FilterArgs {
            query: None,
            department: department.map(String::from),
            level: level.map(String::from),
            time_of_day: time_of_day.map(String::from),
            limit: 20,
        })
    }

    #[test]
    fn test_available_call_passes_through() {
        let call = filtered(Some("ENGLISH"), None, None);
        assert_eq!(decompose_for(call.clone(), &CapabilitySet::all()), Some(call));
    }

    #[test]
    fn test_department_outranks_level_and_time() {
        let out = decompose_for(filtered(Some("ENGLISH"), Some("300"), Some("morning")), &single_filter_set());
        assert_eq!(
            out,
            Some(CapabilityCall::FindSectionsByDepartment { department: "ENGLISH".into() })
        );
    }

    #[test]
    fn test_query_outranks_everything() {
        let call = CapabilityCall::FindSectionsFiltered(FilterArgs {
            query: Some("ethics".into()),
            department: Some("PHILOSOPHY".into()),
            ..Default::default()
        });
        assert_eq!(
            decompose_for(call, &single_filter_set()),
            Some(CapabilityCall::FindCourses { query: "ethics".into() })
        );
    }

    #[test]
    fn test_level_then_time() {
        assert_eq!(
            decompose_for(filtered(None, Some("200"), Some("evening")), &single_filter_set()),
            Some(CapabilityCall::FindSectionsByLevel { level: "200".into() })
        );
        assert_eq!(
            decompose_for(filtered(None, None, Some("evening")), &single_filter_set()),
            Some(CapabilityCall::FindSectionsByTime { time_of_day: "evening".into() })
        );
    }

    #[test]
    fn test_skips_unavailable_candidates() {
        let available = single_filter_set().without(Capability::FindSectionsByDepartment);
        assert_eq!(
            decompose_for(filtered(Some("ENGLISH"), None, Some("morning")), &available),
            Some(CapabilityCall::FindSectionsByTime { time_of_day: "morning".into() })
        );
    }

    #[test]
    fn test_blank_predicates_do_not_count() {
        assert_eq!(decompose_for(filtered(Some("  "), None, None), &single_filter_set()), None);
        assert_eq!(decompose_for(filtered(None, None, None), &single_filter_set()), None);
    }

    #[test]
    fn test_unavailable_single_call() {
        let available = CapabilitySet::all().without(Capability::GetSectionDetails);
        let call = CapabilityCall::GetSectionDetails { section_id: "CS 262-01".into() };
        assert_eq!(decompose_for(call, &available), None);
    }
}
