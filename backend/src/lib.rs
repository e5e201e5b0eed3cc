//! # College Core
//!
//! Backend-for-frontend in front of the college student portal.
//!
//! The portal exposes schedule, class detail, attendance and performance data
//! through a handful of loosely shaped endpoints. This crate wraps them in a
//! small REST API for the client application, delegates bearer-token checks to
//! the external auth service, and reshapes the data on the way through.
//!
//! ## Architecture
//!
//! - [`models`]: wire types shared with the portal and the client
//! - [`services`]: schedule selection, attendance streaks, and the thin
//!   orchestration around them
//! - [`portal`]: repository trait over the portal, HTTP and in-memory backends
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod config;
pub mod models;
pub mod portal;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
