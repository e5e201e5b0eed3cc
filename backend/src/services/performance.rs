//! Grade passthrough.

use tracing::warn;

use crate::models::{PerformanceScoreRequest, PerformanceSubject, ScoreTable};
use crate::portal::{PortalRepository, PortalResult};

pub async fn get_subjects(
    portal: &dyn PortalRepository,
    login: &str,
) -> PortalResult<Vec<PerformanceSubject>> {
    portal.fetch_performance_subjects(login).await.map_err(|e| {
        warn!(login, error = %e, "failed to fetch performance subjects");
        e
    })
}

pub async fn get_score(
    portal: &dyn PortalRepository,
    login: &str,
    request: &PerformanceScoreRequest,
) -> PortalResult<ScoreTable> {
    portal
        .fetch_performance_score(login, request)
        .await
        .map_err(|e| {
            warn!(
                login,
                subject_id = %request.subject_id,
                datastart = %request.datastart,
                dataend = %request.dataend,
                error = %e,
                "failed to fetch performance score"
            );
            e
        })
}
