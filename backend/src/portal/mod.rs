//! Student portal access.
//!
//! The portal is the system of record for schedule, attendance and
//! performance data. This module hides it behind the [`PortalRepository`]
//! trait so the rest of the crate never deals with raw HTTP.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Services (schedule, attendance, grades)    │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  PortalRepository trait                     │
//! └───────────────────┬─────────────────────────┘
//!          ┌──────────┴───────────┐
//!   HttpPortalRepository   LocalPortalRepository
//!     (live portal)          (in-memory)
//! ```

pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use error::{PortalError, PortalResult};
pub use factory::{PortalFactory, PortalKind};
pub use repositories::{HttpPortalRepository, LocalPortalRepository, PortalFixtures};
pub use repository::PortalRepository;
