//! College Core HTTP Server Binary
//!
//! Loads configuration, wires the portal repository and token validator into
//! the router, and serves until interrupted.
//!
//! # Usage
//!
//! ```bash
//! COLLEGE_CONFIG=config/main.toml cargo run --bin college-server
//! ```
//!
//! # Environment Variables
//!
//! - `COLLEGE_CONFIG`: configuration file (default: `config/main.toml`)
//! - `HOST`, `PORT`: listen address overrides
//! - `PORTAL_KIND`, `PORTAL_URL`, `PORTAL_ATTENDANCE_URL`,
//!   `PORTAL_PERFORMANCE_SUBJECTS_URL`, `PORTAL_PERFORMANCE_SCORE_URL`: portal overrides
//! - `AUTH_SERVICE_URL`: token validator base URL
//! - `RUST_LOG`: log filter (default: info)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use college_core::config::AppConfig;
use college_core::http::{create_router, AppState, HttpTokenValidator};
use college_core::portal::PortalFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting college-core HTTP server");

    let config = AppConfig::load().context("failed to load configuration")?;

    let portal = PortalFactory::create(&config.portal).context("failed to create portal repository")?;
    let validator = HttpTokenValidator::new(&config.auth).context("failed to create token validator")?;
    info!(portal = portal.kind(), auth = validator.validation_url(), "upstreams configured");

    let state = AppState::new(portal, Arc::new(validator));
    let app = create_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    let grace = Duration::from_secs(config.server.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(grace))
        .await?;

    info!("Server exited");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM. Arms a watchdog so a stuck connection cannot
/// hold the process past `grace`.
async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        warn!("graceful shutdown timed out, exiting");
        std::process::exit(1);
    });
}
