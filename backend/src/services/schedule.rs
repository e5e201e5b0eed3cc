//! Schedule retrieval for one student.

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::schedule_selector::{merge_event_sources, select_events, SubgroupSelection, WILDCARD};
use crate::models::{ScheduleEvent, ScheduleRequest};
use crate::portal::{PortalRepository, PortalResult};

/// Parameters of a schedule lookup.
#[derive(Debug, Clone, Default)]
pub struct ScheduleQuery {
    /// One or more class groups, comma separated.
    pub group: String,
    pub selection: SubgroupSelection,
    pub start: String,
    pub end: String,
}

impl ScheduleQuery {
    /// Distinct, non-blank class groups in the order given.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.group.split(',').map(str::trim) {
            if !group.is_empty() && !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }
}

/// Fetch every requested group with the wildcard subgroup filter, merge the
/// streams (first group wins on duplicate class ids) and narrow the result to
/// the student's cohorts.
pub async fn get_schedule(
    portal: &dyn PortalRepository,
    query: &ScheduleQuery,
) -> PortalResult<Vec<ScheduleEvent>> {
    let requests: Vec<ScheduleRequest> = query
        .groups()
        .into_iter()
        .map(|group| ScheduleRequest {
            d_start: query.start.clone(),
            d_end: query.end.clone(),
            group: group.to_string(),
            subgroup: WILDCARD.to_string(),
        })
        .collect();

    let sources = try_join_all(requests.iter().map(|request| portal.fetch_schedule(request)))
        .await
        .map_err(|e| {
            warn!(group = %query.group, error = %e, "failed to fetch schedule");
            e
        })?;

    let fetched: usize = sources.iter().map(Vec::len).sum();
    let events = select_events(merge_event_sources(sources), &query.selection);
    debug!(
        group = %query.group,
        fetched,
        selected = events.len(),
        "schedule selected"
    );
    Ok(events)
}

pub async fn get_class_details(
    portal: &dyn PortalRepository,
    class_id: &str,
) -> PortalResult<Map<String, Value>> {
    portal.fetch_class_details(class_id).await.map_err(|e| {
        warn!(class_id, error = %e, "failed to fetch class details");
        e
    })
}
