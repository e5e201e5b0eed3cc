//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use college_core::models::{AttendanceRecord, ScheduleEvent, SubGroup, ATTENDED_STATUS};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Schedule event with one SubGroup per entry of `cohorts`.
pub fn event(id: &str, day: &str, start: &str, cohorts: &[&str]) -> ScheduleEvent {
    ScheduleEvent {
        class_id: id.to_string(),
        day: day.to_string(),
        start: format!("{} {}", day, start),
        end: format!("{} 23:59", day),
        title: format!("class {}", id),
        sub_groups: cohorts
            .iter()
            .map(|cohort| SubGroup {
                class_id: id.to_string(),
                group_id: cohort.to_string(),
                title: format!("{} ({})", id, cohort),
                topic: format!("topic {}", cohort),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn record(id: &str, day: &str, attended: bool) -> AttendanceRecord {
    AttendanceRecord {
        class_id: id.to_string(),
        day: day.to_string(),
        status: if attended { ATTENDED_STATUS } else { 1 },
        title: format!("class {}", id),
        ..Default::default()
    }
}
