//! End-to-end tests for the REST API, driven through the router with an
//! in-memory portal and a fixed token table.

#![cfg(feature = "http-server")]

mod support;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use college_core::http::{create_router, AppState, StaticTokenValidator};
use college_core::models::{PerformanceScore, PerformanceSubject};
use college_core::portal::LocalPortalRepository;
use college_core::services::academic_year_start;

use support::{event, record};

const TOKEN: &str = "token-student1";
const LOGIN: &str = "student1";

fn seeded_portal() -> LocalPortalRepository {
    let portal = LocalPortalRepository::new();
    portal.add_schedule_events(
        "IT-21",
        vec![
            event("e1", "2024-09-02", "10:00", &["B1.01", "A2.02"]),
            event("e2", "2024-09-02", "09:00", &["ФизраКол"]),
            event("e3", "2024-09-01", "12:00", &["Подгр2"]),
            event("e4", "2024-09-03", "09:00", &["3"]),
            event("e6", "2024-09-03", "11:00", &[]),
        ],
    );
    let mut duplicate = event("e1", "2024-09-02", "10:00", &[]);
    duplicate.title = "from IT-22".into();
    portal.add_schedule_events(
        "IT-22",
        vec![duplicate, event("e5", "2024-09-04", "08:00", &[])],
    );

    let mut details = Map::new();
    details.insert("ClID".into(), json!("e1"));
    details.insert("teacher".into(), json!("Ivanova"));
    portal.set_class_details("e1", details);

    portal.add_attendance(
        LOGIN,
        vec![
            record("a1", "2024-09-02", true),
            record("a2", "2024-09-03", false),
            record("a3", "2024-10-01", true),
        ],
    );

    let mut subject_fields = Map::new();
    subject_fields.insert("SuName".into(), json!("Math"));
    portal.set_subjects(
        LOGIN,
        vec![PerformanceSubject {
            subject_id: "17".into(),
            fields: subject_fields,
        }],
    );

    let mut score_fields = Map::new();
    score_fields.insert("mark".into(), json!(5));
    let mut by_kind = BTreeMap::new();
    by_kind.insert(
        "exam".to_string(),
        vec![PerformanceScore {
            fields: score_fields,
        }],
    );
    let mut table = BTreeMap::new();
    table.insert("2024-09".to_string(), by_kind);
    portal.set_scores(LOGIN, "17", table);

    portal
}

fn app_with(portal: LocalPortalRepository) -> Router {
    let validator = StaticTokenValidator::new().with_token(TOKEN, LOGIN);
    create_router(AppState::new(Arc::new(portal), Arc::new(validator)))
}

fn app() -> Router {
    app_with(seeded_portal())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

fn authed_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn ids(body: &Value) -> Vec<String> {
    body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["ClID"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Probes
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "college-core");
}

#[tokio::test]
async fn test_ready() {
    let (status, body) = send(app(), get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ready": true, "service": "college-core"}));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = send(app(), get("/api/v1/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Schedule
// =============================================================================

#[tokio::test]
async fn test_schedule_requires_params() {
    for uri in [
        "/api/v1/schedule",
        "/api/v1/schedule?group=IT-21&start=2024-09-01",
        "/api/v1/schedule?group=&start=2024-09-01&end=2024-09-30",
        "/api/v1/schedule?group=,&start=2024-09-01&end=2024-09-30",
        "/api/v1/schedule?group=%20,%20&start=2024-09-01&end=2024-09-30",
    ] {
        let (status, body) = send(app(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "missing required query params");
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_schedule_without_subgroup_returns_everything_sorted() {
    let (status, body) = send(
        app(),
        get("/api/v1/schedule?group=IT-21&start=2024-09-01&end=2024-09-30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["e3", "e2", "e1", "e4", "e6"]);

    // No collapsing without a concrete subgroup.
    let e2 = &body["events"][1];
    assert_eq!(e2["title"], "class e2");
    assert_eq!(e2["SubGroup"].as_array().unwrap().len(), 1);
    assert_eq!(e2["start"], "09:00");
}

#[tokio::test]
async fn test_schedule_narrowed_to_student_cohorts() {
    let (status, body) = send(
        app(),
        get("/api/v1/schedule?group=IT-21&subgroup=1&english_group=B1.01&start=2024-09-01&end=2024-09-30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["e3", "e2", "e1", "e6"]);

    let e1 = &body["events"][2];
    assert_eq!(e1["title"], "e1 (B1.01)");
    assert_eq!(e1["topic"], "topic B1.01");
    assert!(e1.get("SubGroup").is_none());
}

#[tokio::test]
async fn test_schedule_date_range_is_inclusive() {
    let (_, body) = send(
        app(),
        get("/api/v1/schedule?group=IT-21&start=2024-09-02&end=2024-09-02"),
    )
    .await;
    assert_eq!(ids(&body), vec!["e2", "e1"]);
}

#[tokio::test]
async fn test_schedule_merges_groups_first_wins() {
    let (status, body) = send(
        app(),
        get("/api/v1/schedule?group=IT-21,IT-22&start=2024-09-01&end=2024-09-30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["e3", "e2", "e1", "e4", "e6", "e5"]);
    assert_eq!(body["events"][2]["title"], "class e1");
}

#[tokio::test]
async fn test_schedule_unknown_group_is_empty() {
    let (status, body) = send(
        app(),
        get("/api/v1/schedule?group=XX&start=2024-09-01&end=2024-09-30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
}

// =============================================================================
// Class details
// =============================================================================

#[tokio::test]
async fn test_class_details() {
    let (status, body) = send(app(), get("/api/v1/classdetails")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing id");

    let (status, body) = send(app(), get("/api/v1/classdetails?id=e1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teacher"], "Ivanova");

    let (status, body) = send(app(), get("/api/v1/classdetails?id=zzz")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_protected_routes_reject_bad_credentials() {
    let cases = [
        (None, "missing authorization header"),
        (Some("Basic abc"), "invalid authorization header format"),
        (Some("Bearer "), "invalid authorization header format"),
        (Some("Bearer wrong"), "invalid or expired token"),
    ];

    for (header_value, message) in cases {
        let mut builder = Request::builder().uri("/api/v1/performance/subjects");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (status, body) = send(app(), builder.body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header_value:?}");
        assert_eq!(body["error"], message);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_public_routes_ignore_authorization() {
    let request = Request::builder()
        .uri("/api/v1/classdetails?id=e1")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_attendance_requires_range() {
    let (status, body) = send(app(), authed_get("/api/v1/attendance?start=2024-09-01")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required query params: start and end");
}

#[tokio::test]
async fn test_attendance_for_token_owner() {
    let (status, body) = send(
        app(),
        authed_get("/api/v1/attendance?start=2024-09-01&end=2024-09-30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["ClID"], "a1");
    assert_eq!(records[0]["status"], 2);
}

#[tokio::test]
async fn test_attendance_streak_covers_academic_year() {
    let today = chrono::Local::now().date_naive();
    let today_str = today.format("%Y-%m-%d").to_string();

    let portal = seeded_portal();
    portal.add_attendance(LOGIN, vec![record("today", &today_str, true)]);

    let (status, body) = send(app_with(portal), authed_get("/api/v1/attendance/streak")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period_end"], today_str);
    assert_eq!(
        body["period_start"],
        academic_year_start(today).format("%Y-%m-%d").to_string()
    );
    assert_eq!(body["current_streak"], 1);
    assert_eq!(body["last_attended_date"], today_str);
}

// =============================================================================
// Performance
// =============================================================================

#[tokio::test]
async fn test_performance_subjects() {
    let (status, body) = send(app(), authed_get("/api/v1/performance/subjects")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["SuID"], "17");
    assert_eq!(body[0]["SuName"], "Math");
}

#[tokio::test]
async fn test_performance_score() {
    let (status, body) = send(
        app(),
        authed_post(
            "/api/v1/performance/score",
            r#"{"SuID": "17", "datastart": "2024-09-01", "dataend": "2025-06-30"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["2024-09"]["exam"][0]["mark"], 5);
}

#[tokio::test]
async fn test_performance_score_validation() {
    let (status, body) = send(app(), authed_post("/api/v1/performance/score", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request body");

    let (status, body) = send(
        app(),
        authed_post("/api/v1/performance/score", r#"{"SuID": "17"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required fields: SuID, datastart, dataend");
}
