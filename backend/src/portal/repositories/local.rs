//! In-memory portal for tests and offline development.
//!
//! Holds the same data the live portal would serve, keyed the way the portal
//! is queried (class group, student login, class id). Date-range queries are
//! inclusive and compare `YYYY-MM-DD` strings.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{
    AttendanceRecord, AttendanceRequest, PerformanceScoreRequest, PerformanceSubject,
    ScheduleEvent, ScheduleRequest, ScoreTable,
};
use crate::portal::error::{PortalError, PortalResult};
use crate::portal::repository::PortalRepository;

/// On-disk fixture layout accepted by [`LocalPortalRepository::from_fixture_file`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalFixtures {
    /// Events per class group.
    #[serde(default)]
    pub schedule: HashMap<String, Vec<ScheduleEvent>>,
    #[serde(default)]
    pub class_details: HashMap<String, Map<String, Value>>,
    /// Attendance records per student login.
    #[serde(default)]
    pub attendance: HashMap<String, Vec<AttendanceRecord>>,
    #[serde(default)]
    pub subjects: HashMap<String, Vec<PerformanceSubject>>,
    /// Score tables per login, then per subject id.
    #[serde(default)]
    pub scores: HashMap<String, HashMap<String, ScoreTable>>,
}

fn within(day: &str, start: &str, end: &str) -> bool {
    (start.is_empty() || day >= start) && (end.is_empty() || day <= end)
}

/// In-memory implementation of [`PortalRepository`].
#[derive(Debug, Default)]
pub struct LocalPortalRepository {
    data: RwLock<PortalFixtures>,
}

impl LocalPortalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixtures(fixtures: PortalFixtures) -> Self {
        Self {
            data: RwLock::new(fixtures),
        }
    }

    /// Load fixtures from a JSON file.
    pub fn from_fixture_file<P: AsRef<Path>>(path: P) -> PortalResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PortalError::configuration(format!(
                "failed to read fixture file {}: {}",
                path.display(),
                e
            ))
        })?;
        let fixtures: PortalFixtures = serde_json::from_str(&content).map_err(|e| {
            PortalError::configuration(format!(
                "failed to parse fixture file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_fixtures(fixtures))
    }

    pub fn add_schedule_events(&self, group: &str, events: impl IntoIterator<Item = ScheduleEvent>) {
        self.data
            .write()
            .schedule
            .entry(group.to_string())
            .or_default()
            .extend(events);
    }

    pub fn set_class_details(&self, class_id: &str, details: Map<String, Value>) {
        self.data
            .write()
            .class_details
            .insert(class_id.to_string(), details);
    }

    pub fn add_attendance(&self, login: &str, records: impl IntoIterator<Item = AttendanceRecord>) {
        self.data
            .write()
            .attendance
            .entry(login.to_string())
            .or_default()
            .extend(records);
    }

    pub fn set_subjects(&self, login: &str, subjects: Vec<PerformanceSubject>) {
        self.data.write().subjects.insert(login.to_string(), subjects);
    }

    pub fn set_scores(&self, login: &str, subject_id: &str, table: ScoreTable) {
        self.data
            .write()
            .scores
            .entry(login.to_string())
            .or_default()
            .insert(subject_id.to_string(), table);
    }
}

#[async_trait]
impl PortalRepository for LocalPortalRepository {
    async fn fetch_schedule(&self, request: &ScheduleRequest) -> PortalResult<Vec<ScheduleEvent>> {
        let data = self.data.read();
        let events = data
            .schedule
            .get(&request.group)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| within(&e.day, &request.d_start, &request.d_end))
                    .cloned()
                    .map(|mut e| {
                        e.normalize_clock_times();
                        e
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(events)
    }

    async fn fetch_class_details(&self, class_id: &str) -> PortalResult<Map<String, Value>> {
        self.data
            .read()
            .class_details
            .get(class_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("class", class_id))
    }

    async fn fetch_attendance(
        &self,
        login: &str,
        request: &AttendanceRequest,
    ) -> PortalResult<Vec<AttendanceRecord>> {
        let data = self.data.read();
        let records = data
            .attendance
            .get(login)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| within(&r.day, &request.d_start, &request.d_end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn fetch_performance_subjects(&self, login: &str) -> PortalResult<Vec<PerformanceSubject>> {
        Ok(self
            .data
            .read()
            .subjects
            .get(login)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_performance_score(
        &self,
        login: &str,
        request: &PerformanceScoreRequest,
    ) -> PortalResult<ScoreTable> {
        Ok(self
            .data
            .read()
            .scores
            .get(login)
            .and_then(|by_subject| by_subject.get(&request.subject_id))
            .cloned()
            .unwrap_or_default())
    }

    fn kind(&self) -> &'static str {
        "local"
    }
}
