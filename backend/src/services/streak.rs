//! Attendance streak computation.
//!
//! Attendance is sparse: only days with scheduled classes produce records, so
//! every figure here is measured in *school days* (days with at least one
//! record), not calendar days.

use std::collections::BTreeMap;

use crate::models::{AttendanceRecord, StreakResponse};

/// Per-day attendance flag keyed by `YYYY-MM-DD`. A day is attended when any
/// of its records is attended; days without records are absent.
pub fn day_status(records: &[AttendanceRecord]) -> BTreeMap<&str, bool> {
    let mut days: BTreeMap<&str, bool> = BTreeMap::new();
    for record in records {
        let attended = days.entry(record.day.as_str()).or_insert(false);
        *attended |= record.attended();
    }
    days
}

/// Consecutive attended days counting back from the most recent school day.
pub fn current_streak(days: &BTreeMap<&str, bool>) -> u32 {
    days.values().rev().take_while(|attended| **attended).count() as u32
}

/// Longest run of attended entries in date order.
///
/// Runs are measured over the recorded days only: a stretch of calendar days
/// without records (weekend, holiday) does not break a run.
pub fn longest_streak(days: &BTreeMap<&str, bool>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for attended in days.values() {
        if *attended {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Summarise `records` for the period `[period_start, period_end]`.
///
/// The period bounds are echoed back as given; they are not used to filter.
pub fn calculate_streak(
    records: &[AttendanceRecord],
    period_start: &str,
    period_end: &str,
) -> StreakResponse {
    let mut summary = StreakResponse {
        period_start: period_start.to_string(),
        period_end: period_end.to_string(),
        ..Default::default()
    };
    if records.is_empty() {
        return summary;
    }

    let days = day_status(records);
    let total_attended = days.values().filter(|attended| **attended).count() as u32;
    let total_days = days.len() as u32;

    summary.current_streak = current_streak(&days);
    summary.longest_streak = longest_streak(&days);
    summary.total_days_attended = total_attended;
    summary.total_school_days = total_days;
    summary.attendance_rate = if total_days > 0 {
        f64::from(total_attended) / f64::from(total_days)
    } else {
        0.0
    };
    summary.last_attended_date = days
        .iter()
        .rev()
        .find(|(_, attended)| **attended)
        .map(|(day, _)| day.to_string())
        .unwrap_or_default();

    summary
}

#[cfg(test)]
#[path = "streak_tests.rs"]
mod tests;
