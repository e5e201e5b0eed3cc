//! Portal repository factory.
//!
//! Builds the repository instance selected by configuration.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::error::{PortalError, PortalResult};
use super::repositories::{HttpPortalRepository, LocalPortalRepository};
use super::repository::PortalRepository;
use crate::config::PortalSettings;

/// Which portal backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalKind {
    /// The live portal over HTTP
    Http,
    /// In-memory fixtures
    Local,
}

impl FromStr for PortalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "remote" => Ok(Self::Http),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown portal kind: {}", s)),
        }
    }
}

pub struct PortalFactory;

impl PortalFactory {
    /// Create the repository described by `settings`.
    pub fn create(settings: &PortalSettings) -> PortalResult<Arc<dyn PortalRepository>> {
        let kind = settings.portal_kind().map_err(PortalError::configuration)?;
        match kind {
            PortalKind::Http => {
                info!(url = %settings.url, "using HTTP portal");
                Ok(Arc::new(HttpPortalRepository::new(settings)?))
            }
            PortalKind::Local => match &settings.fixtures {
                Some(path) => {
                    info!(fixtures = %path.display(), "using local portal with fixtures");
                    Ok(Arc::new(LocalPortalRepository::from_fixture_file(path)?))
                }
                None => {
                    info!("using empty local portal");
                    Ok(Self::create_local())
                }
            },
        }
    }

    pub fn create_local() -> Arc<dyn PortalRepository> {
        Arc::new(LocalPortalRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_kind_from_str() {
        assert_eq!(PortalKind::from_str("http").unwrap(), PortalKind::Http);
        assert_eq!(PortalKind::from_str("LOCAL").unwrap(), PortalKind::Local);
        assert!(PortalKind::from_str("ftp").is_err());
    }

    #[test]
    fn test_create_local_from_settings() {
        let settings = PortalSettings {
            kind: "local".into(),
            ..Default::default()
        };
        let repo = PortalFactory::create(&settings).unwrap();
        assert_eq!(repo.kind(), "local");
    }

    #[test]
    fn test_create_http_from_settings() {
        let settings = PortalSettings {
            kind: "http".into(),
            url: "https://portal.example".into(),
            ..Default::default()
        };
        let repo = PortalFactory::create(&settings).unwrap();
        assert_eq!(repo.kind(), "http");
    }

    #[test]
    fn test_invalid_kind_is_configuration_error() {
        let settings = PortalSettings {
            kind: "carrier-pigeon".into(),
            ..Default::default()
        };
        assert!(matches!(
            PortalFactory::create(&settings),
            Err(PortalError::Configuration(_))
        ));
    }
}
