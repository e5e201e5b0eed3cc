//! Attendance wire types and the derived streak summary.

use serde::{Deserialize, Serialize};

/// Status code the portal uses for "attended".
pub const ATTENDED_STATUS: i64 = 2;

/// SubGroup entry attached to an attendance record. Same shape as the
/// schedule's SubGroup, except the category id travels as `SCaID`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSubGroup {
    #[serde(rename = "SClID", default)]
    pub class_id: String,
    #[serde(rename = "SGrID", default)]
    pub group_id: String,
    #[serde(rename = "SCaID", default)]
    pub category_id: String,
    #[serde(rename = "STopic", default)]
    pub topic: String,
    #[serde(rename = "STitle", default)]
    pub title: String,
}

/// Attendance outcome of one class occurrence for one student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "ClID")]
    pub class_id: String,
    #[serde(rename = "Day", default)]
    pub day: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub title: String,
    #[serde(
        rename = "SubGroup",
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_groups: Vec<AttendanceSubGroup>,
}

impl AttendanceRecord {
    pub fn attended(&self) -> bool {
        self.status == ATTENDED_STATUS
    }

    /// Same flattening rule as [`super::ScheduleEvent::collapse_single_subgroup`].
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
}

/// Body of the portal's attendance endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    pub d_start: String,
    pub d_end: String,
}

/// Attendance streak summary over a query period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakResponse {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_days_attended: u32,
    pub total_school_days: u32,
    pub attendance_rate: f64,
    pub last_attended_date: String,
    pub period_start: String,
    pub period_end: String,
}
