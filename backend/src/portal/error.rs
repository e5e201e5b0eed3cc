//! Error types for portal operations.

/// Result type for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

/// Error type for portal operations.
///
/// Every variant names the upstream endpoint involved so log lines can be
/// traced back to a specific portal service.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Network-level failure (connect, TLS, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The portal answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The portal's payload did not match the expected shape.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Requested entity does not exist (local repository only; the live portal
    /// answers with an empty payload instead).
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Misconfigured repository.
    #[error("portal configuration error: {0}")]
    Configuration(String),
}

impl PortalError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the failure came from talking to the portal rather than from
    /// this service's own setup.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }
}
