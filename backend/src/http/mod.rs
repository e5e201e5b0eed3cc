//! HTTP server module.
//!
//! Exposes the gateway as a REST API for the client application.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query validation, bearer-token delegation              │
//! │  - JSON serialization, CORS, compression, tracing         │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Schedule selection, attendance streaks                 │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Portal Layer (portal/)                                   │
//! │  - HttpPortalRepository / LocalPortalRepository           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use auth::{AuthenticatedUser, HttpTokenValidator, StaticTokenValidator, TokenValidator};
pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
