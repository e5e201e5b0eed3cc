//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing,
//! authentication), and creates the axum router ready for serving.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::require_auth;
use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The mobile client calls from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/schedule", get(handlers::get_schedule))
        .route("/classdetails", get(handlers::get_class_details));

    // Student-specific data: the portal login comes from the validated token.
    let protected = Router::new()
        .route("/attendance", get(handlers::get_attendance))
        .route("/attendance/streak", get(handlers::get_attendance_streak))
        .route("/performance/subjects", get(handlers::get_performance_subjects))
        .route("/performance/score", post(handlers::get_performance_score))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .nest("/api/v1", public.merge(protected))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
