//! Application state for the HTTP server.

use std::sync::Arc;

use super::auth::TokenValidator;
use crate::portal::PortalRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream student portal
    pub portal: Arc<dyn PortalRepository>,
    /// External bearer-token validator
    pub validator: Arc<dyn TokenValidator>,
}

impl AppState {
    pub fn new(portal: Arc<dyn PortalRepository>, validator: Arc<dyn TokenValidator>) -> Self {
        Self { portal, validator }
    }
}
