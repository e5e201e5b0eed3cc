//! HTTP handlers for the REST API.
//!
//! Each handler validates its inputs and delegates to the service layer.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde_json::{Map, Value};

use super::auth::AuthenticatedUser;
use super::dto::{
    present, AttendanceParams, ClassDetailsParams, HealthResponse, ReadyResponse, ScheduleParams,
    SERVICE_NAME,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    AttendanceRecord, PerformanceScoreRequest, PerformanceSubject, ScheduleResponse, ScoreTable,
    StreakResponse,
};
use crate::services::{self, ScheduleQuery, SubgroupSelection};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Probes
// =============================================================================

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /ready
pub async fn readiness_check() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        ready: true,
        service: SERVICE_NAME.to_string(),
    })
}

// =============================================================================
// Schedule
// =============================================================================

/// GET /api/v1/schedule
///
/// Schedule of one student: `group`, `start` and `end` are required; the
/// cohort selectors are optional.
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> HandlerResult<ScheduleResponse> {
    let (Some(group), Some(start), Some(end)) = (
        present(&params.group),
        present(&params.start),
        present(&params.end),
    ) else {
        return Err(AppError::BadRequest("missing required query params".to_string()));
    };

    let query = ScheduleQuery {
        group: group.to_string(),
        selection: SubgroupSelection::new(
            params.subgroup.clone().unwrap_or_default(),
            params.english_group.clone().unwrap_or_default(),
            params.profile_subgroup.clone().unwrap_or_default(),
        ),
        start: start.to_string(),
        end: end.to_string(),
    };
    // `group=,` passes the presence check but names no group.
    if query.groups().is_empty() {
        return Err(AppError::BadRequest("missing required query params".to_string()));
    }

    let events = services::get_schedule(state.portal.as_ref(), &query).await?;
    Ok(Json(ScheduleResponse { events }))
}

/// GET /api/v1/classdetails?id=...
pub async fn get_class_details(
    State(state): State<AppState>,
    Query(params): Query<ClassDetailsParams>,
) -> HandlerResult<Map<String, Value>> {
    let class_id =
        present(&params.id).ok_or_else(|| AppError::BadRequest("missing id".to_string()))?;

    let details = services::get_class_details(state.portal.as_ref(), class_id).await?;
    Ok(Json(details))
}

// =============================================================================
// Attendance (authenticated)
// =============================================================================

/// GET /api/v1/attendance
pub async fn get_attendance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<AttendanceParams>,
) -> HandlerResult<Vec<AttendanceRecord>> {
    let (Some(start), Some(end)) = (present(&params.start), present(&params.end)) else {
        return Err(AppError::BadRequest(
            "missing required query params: start and end".to_string(),
        ));
    };

    let records =
        services::get_attendance(state.portal.as_ref(), user.login(), start, end).await?;
    Ok(Json(records))
}

/// GET /api/v1/attendance/streak
///
/// Streak over the current academic year, up to today (server local time).
pub async fn get_attendance_streak(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> HandlerResult<StreakResponse> {
    let today = chrono::Local::now().date_naive();
    let summary =
        services::get_attendance_streak(state.portal.as_ref(), user.login(), today).await?;
    Ok(Json(summary))
}

// =============================================================================
// Performance (authenticated)
// =============================================================================

/// GET /api/v1/performance/subjects
pub async fn get_performance_subjects(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> HandlerResult<Vec<PerformanceSubject>> {
    let subjects = services::get_subjects(state.portal.as_ref(), user.login()).await?;
    Ok(Json(subjects))
}

/// POST /api/v1/performance/score
pub async fn get_performance_score(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<PerformanceScoreRequest>, JsonRejection>,
) -> HandlerResult<ScoreTable> {
    let Json(request) =
        payload.map_err(|_| AppError::BadRequest("invalid request body".to_string()))?;

    if request.subject_id.is_empty() || request.datastart.is_empty() || request.dataend.is_empty() {
        return Err(AppError::BadRequest(
            "missing required fields: SuID, datastart, dataend".to_string(),
        ));
    }

    let scores = services::get_score(state.portal.as_ref(), user.login(), &request).await?;
    Ok(Json(scores))
}
