//! Live portal access over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::PortalSettings;
use crate::models::{
    AttendanceRecord, AttendanceRequest, PerformanceScoreRequest, PerformanceSubject,
    ScheduleEvent, ScheduleRequest, ScoreTable,
};
use crate::portal::error::{PortalError, PortalResult};
use crate::portal::repository::PortalRepository;

const SCHEDULE_PATH: &str = "Services/schedule25.php";
const CLASS_DETAILS_PATH: &str = "Services/classdetails25.php";

/// The portal identifies the student through this session cookie.
fn session_cookie(login: &str) -> String {
    format!("session=STDNT-login-user={}", login)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Portal repository backed by the real portal endpoints.
#[derive(Debug, Clone)]
pub struct HttpPortalRepository {
    client: Client,
    schedule_url: String,
    class_details_url: String,
    attendance_url: String,
    performance_subjects_url: String,
    performance_score_url: String,
}

impl HttpPortalRepository {
    pub fn new(settings: &PortalSettings) -> PortalResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| PortalError::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            schedule_url: join_url(&settings.url, SCHEDULE_PATH),
            class_details_url: join_url(&settings.url, CLASS_DETAILS_PATH),
            attendance_url: settings.attendance_url.clone(),
            performance_subjects_url: settings.performance_subjects_url.clone(),
            performance_score_url: settings.performance_score_url.clone(),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> PortalResult<T> {
        let response = request
            .send()
            .await
            .map_err(|source| PortalError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| PortalError::Transport { endpoint, source })?;
        debug!(endpoint, bytes = body.len(), "portal response received");

        serde_json::from_slice(&body).map_err(|source| PortalError::Decode { endpoint, source })
    }
}

#[async_trait]
impl PortalRepository for HttpPortalRepository {
    async fn fetch_schedule(&self, request: &ScheduleRequest) -> PortalResult<Vec<ScheduleEvent>> {
        let mut events: Vec<ScheduleEvent> =
            Self::send_json("schedule", self.client.post(&self.schedule_url).json(request)).await?;

        for event in &mut events {
            event.normalize_clock_times();
        }
        Ok(events)
    }

    async fn fetch_class_details(&self, class_id: &str) -> PortalResult<Map<String, Value>> {
        let body = serde_json::json!({ "clid": class_id });
        Self::send_json(
            "classdetails",
            self.client.post(&self.class_details_url).json(&body),
        )
        .await
    }

    async fn fetch_attendance(
        &self,
        login: &str,
        request: &AttendanceRequest,
    ) -> PortalResult<Vec<AttendanceRecord>> {
        Self::send_json(
            "attendance",
            self.client
                .post(&self.attendance_url)
                .header(COOKIE, session_cookie(login))
                .json(request),
        )
        .await
    }

    async fn fetch_performance_subjects(&self, login: &str) -> PortalResult<Vec<PerformanceSubject>> {
        Self::send_json(
            "performance_subjects",
            self.client
                .get(&self.performance_subjects_url)
                .header(COOKIE, session_cookie(login)),
        )
        .await
    }

    async fn fetch_performance_score(
        &self,
        login: &str,
        request: &PerformanceScoreRequest,
    ) -> PortalResult<ScoreTable> {
        Self::send_json(
            "performance_score",
            self.client
                .post(&self.performance_score_url)
                .header(COOKIE, session_cookie(login))
                .json(request),
        )
        .await
    }

    fn kind(&self) -> &'static str {
        "http"
    }
}
