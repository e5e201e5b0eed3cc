//! Narrow the portal's fused schedule stream down to one student's view.
//!
//! The portal returns every cohort variant of a class occurrence as a SubGroup
//! entry on a single event. Cohort membership rules differ per kind of cohort
//! (language level, elective profile, exempt sports cohorts), so the narrowing
//! happens here rather than upstream.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ScheduleEvent, SubGroup};

/// Selector value meaning "no restriction".
pub const WILDCARD: &str = "*";

/// Prefix of elective-profile cohort identifiers.
pub const PROFILE_PREFIX: &str = "Подгр";

/// Profile selector value meaning "every profile".
pub const PROFILE_ALL: &str = "Все";

/// Physical-education cohorts every student keeps regardless of selectors.
pub const EXEMPT_COHORTS: [&str; 3] = ["ФизраКол", "БрайтФит", "БаскетКол"];

static LANGUAGE_LEVEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(A0|A1|A2|B1)\.[0-9]{2}$").expect("language level pattern is valid")
});

/// Unicode-aware case-insensitive equality (cohort names are Cyrillic).
fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn is_unrestricted(selector: &str) -> bool {
    selector.is_empty() || selector == WILDCARD
}

pub fn is_exempt_cohort(group_id: &str) -> bool {
    EXEMPT_COHORTS
        .iter()
        .any(|cohort| eq_ignore_case(group_id, cohort))
}

pub fn is_language_level(group_id: &str) -> bool {
    LANGUAGE_LEVEL_PATTERN.is_match(group_id)
}

pub fn is_profile_group(group_id: &str) -> bool {
    group_id.starts_with(PROFILE_PREFIX)
}

/// The three cohort selectors a student supplies with a schedule query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubgroupSelection {
    pub subgroup: String,
    pub english_group: String,
    pub profile_subgroup: String,
}

impl SubgroupSelection {
    pub fn new(
        subgroup: impl Into<String>,
        english_group: impl Into<String>,
        profile_subgroup: impl Into<String>,
    ) -> Self {
        Self {
            subgroup: subgroup.into(),
            english_group: english_group.into(),
            profile_subgroup: profile_subgroup.into(),
        }
    }

    /// Filtering and collapsing only happen once a concrete subgroup is chosen.
    pub fn is_active(&self) -> bool {
        !is_unrestricted(&self.subgroup)
    }

    /// A profile-looking `subgroup` takes precedence over `profile_subgroup`.
    fn effective_profile(&self) -> &str {
        if is_profile_group(&self.subgroup) {
            &self.subgroup
        } else {
            &self.profile_subgroup
        }
    }

    /// Whether `sg` is visible to this student. Rules are checked in order and
    /// the first one that claims the SubGroup decides.
    pub fn keeps(&self, sg: &SubGroup) -> bool {
        let id = sg.group_id.as_str();

        if is_exempt_cohort(id) {
            return true;
        }
        if eq_ignore_case(id, &self.subgroup) {
            return true;
        }
        if is_language_level(id) {
            return is_unrestricted(&self.english_group) || eq_ignore_case(id, &self.english_group);
        }
        if is_profile_group(id) {
            let profile = self.effective_profile();
            return is_unrestricted(profile)
                || eq_ignore_case(profile, PROFILE_ALL)
                || eq_ignore_case(id, profile);
        }
        false
    }
}

/// Concatenate event lists keyed by class id. The first occurrence of a class
/// id wins and the relative order of survivors is preserved.
pub fn merge_event_sources<I>(sources: I) -> Vec<ScheduleEvent>
where
    I: IntoIterator<Item = Vec<ScheduleEvent>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for source in sources {
        for event in source {
            if seen.insert(event.class_id.clone()) {
                merged.push(event);
            }
        }
    }
    merged
}

/// Drop invisible SubGroups; drop events left without any.
///
/// Events that never had SubGroups are whole-group classes and always pass.
pub fn filter_events(events: Vec<ScheduleEvent>, selection: &SubgroupSelection) -> Vec<ScheduleEvent> {
    if !selection.is_active() {
        return events;
    }

    events
        .into_iter()
        .filter_map(|mut event| {
            if event.sub_groups.is_empty() {
                return Some(event);
            }
            event.sub_groups.retain(|sg| selection.keeps(sg));
            if event.sub_groups.is_empty() {
                None
            } else {
                Some(event)
            }
        })
        .collect()
}

/// Stable sort by day, then start time (both compared as strings).
pub fn sort_events(events: &mut [ScheduleEvent]) {
    events.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.start.cmp(&b.start)));
}

/// Full selection pipeline: dedup, filter, collapse unambiguous events, sort.
///
/// Events still carrying two or more SubGroups are returned as-is for the
/// client to disambiguate.
pub fn select_events(events: Vec<ScheduleEvent>, selection: &SubgroupSelection) -> Vec<ScheduleEvent> {
    let unique = merge_event_sources([events]);
    let mut selected = filter_events(unique, selection);

    if selection.is_active() {
        for event in &mut selected {
            event.collapse_single_subgroup();
        }
    }

    sort_events(&mut selected);
    selected
}

#[cfg(test)]
#[path = "schedule_selector_tests.rs"]
mod tests;
