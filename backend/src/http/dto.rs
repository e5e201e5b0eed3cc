//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies that mirror portal data are re-exported from `models`;
//! this module only adds query parameter and probe types.

use serde::{Deserialize, Serialize};

pub use crate::models::{
    AttendanceRecord, PerformanceScoreRequest, PerformanceSubject, ScheduleEvent,
    ScheduleResponse, ScoreTable, StreakResponse,
};

/// Service name reported by the probes.
pub const SERVICE_NAME: &str = "college-core";

/// Non-empty value of an optional query parameter.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Query parameters for the schedule endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Class group(s), comma separated (required)
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub subgroup: Option<String>,
    #[serde(default)]
    pub english_group: Option<String>,
    #[serde(default)]
    pub profile_subgroup: Option<String>,
    /// First day, `YYYY-MM-DD` (required)
    #[serde(default)]
    pub start: Option<String>,
    /// Last day, `YYYY-MM-DD` (required)
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDetailsParams {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Readiness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub service: String,
}
