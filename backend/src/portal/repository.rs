//! Portal repository trait.
//!
//! Abstracts the student portal so services and handlers can run against the
//! live HTTP portal or an in-memory fixture store.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::PortalResult;
use crate::models::{
    AttendanceRecord, AttendanceRequest, PerformanceScoreRequest, PerformanceSubject,
    ScheduleEvent, ScheduleRequest, ScoreTable,
};

/// Read-only access to the portal's student data.
///
/// Implementations must be thread-safe (`Send + Sync`); one instance is shared
/// by every request handler.
#[async_trait]
pub trait PortalRepository: Send + Sync {
    /// Raw schedule events for a class group and date range. `start`/`end`
    /// are already reduced to `HH:MM`.
    async fn fetch_schedule(&self, request: &ScheduleRequest) -> PortalResult<Vec<ScheduleEvent>>;

    /// Free-form detail record of one class occurrence.
    async fn fetch_class_details(&self, class_id: &str) -> PortalResult<Map<String, Value>>;

    /// Attendance records of `login` for a date range.
    async fn fetch_attendance(
        &self,
        login: &str,
        request: &AttendanceRequest,
    ) -> PortalResult<Vec<AttendanceRecord>>;

    async fn fetch_performance_subjects(&self, login: &str) -> PortalResult<Vec<PerformanceSubject>>;

    async fn fetch_performance_score(
        &self,
        login: &str,
        request: &PerformanceScoreRequest,
    ) -> PortalResult<ScoreTable>;

    /// Short identifier used in logs and the readiness probe.
    fn kind(&self) -> &'static str;
}
