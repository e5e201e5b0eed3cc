//! Portal repository implementations:
//! - `http`: the live portal over HTTP
//! - `local`: in-memory store for tests and offline development
pub mod http;
pub mod local;

pub use http::HttpPortalRepository;
pub use local::{LocalPortalRepository, PortalFixtures};
