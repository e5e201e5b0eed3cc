//! Attendance listing and streak summary.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use super::streak::calculate_streak;
use crate::models::{AttendanceRecord, AttendanceRequest, StreakResponse};
use crate::portal::{PortalRepository, PortalResult};

/// Date format the portal speaks.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// First day of the academic year containing `today` (1 September).
pub fn academic_year_start(today: NaiveDate) -> NaiveDate {
    let year = if today.month() < 9 {
        today.year() - 1
    } else {
        today.year()
    };
    NaiveDate::from_ymd_opt(year, 9, 1).unwrap_or(today)
}

/// Attendance records of `login` between `start` and `end`, with records that
/// belong to exactly one SubGroup flattened.
pub async fn get_attendance(
    portal: &dyn PortalRepository,
    login: &str,
    start: &str,
    end: &str,
) -> PortalResult<Vec<AttendanceRecord>> {
    let request = AttendanceRequest {
        d_start: start.to_string(),
        d_end: end.to_string(),
    };
    let mut records = portal.fetch_attendance(login, &request).await.map_err(|e| {
        warn!(login, error = %e, "failed to fetch attendance");
        e
    })?;

    for record in &mut records {
        record.collapse_single_subgroup();
    }
    Ok(records)
}

/// Streak summary of `login` from the start of the current academic year up
/// to `today`.
pub async fn get_attendance_streak(
    portal: &dyn PortalRepository,
    login: &str,
    today: NaiveDate,
) -> PortalResult<StreakResponse> {
    let period_start = academic_year_start(today).format(DATE_FORMAT).to_string();
    let period_end = today.format(DATE_FORMAT).to_string();

    let request = AttendanceRequest {
        d_start: period_start.clone(),
        d_end: period_end.clone(),
    };
    let records = portal.fetch_attendance(login, &request).await.map_err(|e| {
        warn!(login, error = %e, "failed to fetch attendance for streak");
        e
    })?;

    let summary = calculate_streak(&records, &period_start, &period_end);
    debug!(
        login,
        records = records.len(),
        current = summary.current_streak,
        longest = summary.longest_streak,
        "attendance streak computed"
    );
    Ok(summary)
}
