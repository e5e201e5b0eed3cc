//! Service configuration.
//!
//! Settings come from a TOML file, then environment variables override
//! individual keys (deployment secrets such as upstream URLs are usually only
//! provided through the environment).

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::portal::PortalKind;

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "COLLEGE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub portal: PortalSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Grace period for in-flight requests after a shutdown signal.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

/// Upstream portal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSettings {
    /// `http` or `local`
    #[serde(default = "default_portal_kind")]
    pub kind: String,
    /// Base URL serving the schedule and class-detail services
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub attendance_url: String,
    #[serde(default)]
    pub performance_subjects_url: String,
    #[serde(default)]
    pub performance_score_url: String,
    #[serde(default = "default_portal_timeout")]
    pub timeout_secs: u64,
    /// The portal is commonly deployed with a self-signed certificate.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// JSON fixtures for the local portal
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

/// External token validator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub service_url: String,
    #[serde(default = "default_auth_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_shutdown_timeout() -> u64 {
    10
}

fn default_portal_kind() -> String {
    "http".to_string()
}

fn default_portal_timeout() -> u64 {
    30
}

fn default_auth_timeout() -> u64 {
    5
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            kind: default_portal_kind(),
            url: String::new(),
            attendance_url: String::new(),
            performance_subjects_url: String::new(),
            performance_score_url: String::new(),
            timeout_secs: default_portal_timeout(),
            accept_invalid_certs: false,
            fixtures: None,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            timeout_secs: default_auth_timeout(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad listen address {}:{}: {}", self.host, self.port, e)))
    }
}

impl PortalSettings {
    pub fn portal_kind(&self) -> Result<PortalKind, String> {
        PortalKind::from_str(&self.kind)
    }
}

impl AppConfig {
    /// Parse configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find the configuration file.
    ///
    /// Checks `$COLLEGE_CONFIG` first, then:
    /// 1. `config/main.toml`
    /// 2. `backend/config/main.toml`
    /// 3. `../config/main.toml`
    pub fn locate() -> Option<PathBuf> {
        if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(explicit));
        }

        [
            "config/main.toml",
            "backend/config/main.toml",
            "../config/main.toml",
        ]
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
    }

    /// Load the file found by [`AppConfig::locate`] (or defaults), apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::locate() {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                Self::from_file(&path)?
            }
            None => {
                warn!("no config file found, using defaults and environment");
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps an environment variable name
    /// to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a valid port number, got {:?}", port)))?;
        }

        let portal = [
            ("PORTAL_KIND", &mut self.portal.kind),
            ("PORTAL_URL", &mut self.portal.url),
            ("PORTAL_ATTENDANCE_URL", &mut self.portal.attendance_url),
            (
                "PORTAL_PERFORMANCE_SUBJECTS_URL",
                &mut self.portal.performance_subjects_url,
            ),
            (
                "PORTAL_PERFORMANCE_SCORE_URL",
                &mut self.portal.performance_score_url,
            ),
            ("AUTH_SERVICE_URL", &mut self.auth.service_url),
        ];
        for (key, slot) in portal {
            if let Some(value) = lookup(key) {
                *slot = value;
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let kind = self.portal.portal_kind().map_err(ConfigError::Invalid)?;

        if kind == PortalKind::Http {
            let required = [
                ("portal.url", &self.portal.url),
                ("portal.attendance_url", &self.portal.attendance_url),
                (
                    "portal.performance_subjects_url",
                    &self.portal.performance_subjects_url,
                ),
                (
                    "portal.performance_score_url",
                    &self.portal.performance_score_url,
                ),
            ];
            if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "{} is required for the http portal",
                    name
                )));
            }
        }

        if self.auth.service_url.is_empty() {
            return Err(ConfigError::Invalid("auth.service_url is required".to_string()));
        }

        Ok(())
    }
}
