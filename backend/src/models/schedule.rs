// ============================================================================
// Schedule wire types
// ============================================================================
//
// Field names follow the portal's JSON exactly; the client application relies
// on them, so every rename below is load-bearing.

use serde::{Deserialize, Serialize};

/// A named cohort slice of one class occurrence (language level, elective
/// track, or an exempt sports cohort).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGroup {
    #[serde(rename = "SClID", default)]
    pub class_id: String,
    /// Cohort identifier, e.g. `A1.01` or `Подгр2`.
    #[serde(rename = "SGrID", default)]
    pub group_id: String,
    #[serde(rename = "SGCaID", default)]
    pub category_id: String,
    #[serde(rename = "STopic", default)]
    pub topic: String,
    #[serde(rename = "STitle", default)]
    pub title: String,
}

/// One timetabled class occurrence as returned by the portal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    #[serde(rename = "ClID")]
    pub class_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(rename = "Day", default)]
    pub day: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub title: String,
    #[serde(
        rename = "SubGroup",
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_groups: Vec<SubGroup>,
}

impl ScheduleEvent {
    /// Flatten an event that has exactly one SubGroup into a plain event.
    ///
    /// The title always comes from the SubGroup; topic and room are only
    /// filled when the event's own value is empty. Returns `false` and leaves
    /// the event untouched when it does not carry exactly one SubGroup.
    pub fn collapse_single_subgroup(&mut self) -> bool {
        if self.sub_groups.len() != 1 {
            return false;
        }
        let sg = self.sub_groups.remove(0);
        self.title = sg.title;
        if self.topic.is_empty() {
            self.topic = sg.topic;
        }
        if self.room.is_empty() {
            self.room = sg.category_id;
        }
        true
    }

    /// Strip the date part the portal sometimes prepends to `start`/`end`
    /// (`"2024-09-02 09:00"` becomes `"09:00"`).
    pub fn normalize_clock_times(&mut self) {
        self.start = clock_time(&self.start).to_string();
        self.end = clock_time(&self.end).to_string();
    }
}

/// Last space-separated token of a portal time value.
pub fn clock_time(value: &str) -> &str {
    match value.rsplit_once(' ') {
        Some((_, time)) => time,
        None => value,
    }
}

/// Body of the portal's schedule endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub d_start: String,
    pub d_end: String,
    pub group: String,
    pub subgroup: String,
}

/// Response of `GET /api/v1/schedule`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub events: Vec<ScheduleEvent>,
}
