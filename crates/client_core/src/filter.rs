//! Per-level text filters.
//!
//! Colleges use a hard filter: no match means an empty result. Branches and
//! alumni fall back to the unfiltered list when a non-empty filter matches
//! nothing, and report that they did so.

use shared::domain::AlumniRecord;

/// Result of a fallback-capable filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered<'a, T> {
    pub items: Vec<&'a T>,
    /// Set when the filter matched nothing and `items` is the full list.
    pub fell_back: bool,
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn college_matches(college: &str, filter: &str) -> bool {
    contains_ignore_case(college, &filter.to_lowercase())
}

pub fn branch_matches(branch: &str, filter: &str) -> bool {
    contains_ignore_case(branch, &filter.to_lowercase())
}

pub fn alumni_matches(record: &AlumniRecord, filter: &str) -> bool {
    let needle = filter.to_lowercase();
    contains_ignore_case(&record.name, &needle)
        || record
            .bio
            .as_deref()
            .is_some_and(|bio| contains_ignore_case(bio, &needle))
}

pub fn filter_colleges<'a>(colleges: &'a [String], filter: &str) -> Vec<&'a String> {
    colleges
        .iter()
        .filter(|college| college_matches(college, filter))
        .collect()
}

pub fn filter_branches<'a>(branches: &'a [String], filter: &str) -> Filtered<'a, String> {
    with_fallback(branches, filter, |branch, filter| {
        branch_matches(branch, filter)
    })
}

pub fn filter_alumni<'a>(alumni: &'a [AlumniRecord], filter: &str) -> Filtered<'a, AlumniRecord> {
    with_fallback(alumni, filter, alumni_matches)
}

fn with_fallback<'a, T>(
    items: &'a [T],
    filter: &str,
    matches: impl Fn(&T, &str) -> bool,
) -> Filtered<'a, T> {
    if filter.is_empty() {
        return Filtered {
            items: items.iter().collect(),
            fell_back: false,
        };
    }

    let matched: Vec<&T> = items.iter().filter(|item| matches(item, filter)).collect();
    if matched.is_empty() {
        Filtered {
            items: items.iter().collect(),
            fell_back: true,
        }
    } else {
        Filtered {
            items: matched,
            fell_back: false,
        }
    }
}
