//! Bearer-token authentication delegated to an external validator.
//!
//! This service never inspects tokens itself. It forwards them to the auth
//! service and, when accepted, exposes the returned user id to handlers as an
//! [`AuthenticatedUser`] request extension. That id doubles as the portal
//! login.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::error::AppError;
use super::state::AppState;
use crate::config::AuthSettings;

/// User id of the caller, inserted by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn login(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("invalid authorization header format")]
    InvalidFormat,
    #[error("invalid or expired token")]
    Rejected,
    /// The validator could not be asked or gave an unusable answer.
    #[error("token validation failed: {0}")]
    Validation(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(detail) => {
                error!(error = %detail, "token validation failed");
                AppError::Unauthorized("token validation failed".to_string())
            }
            other => {
                warn!(reason = %other, "request rejected");
                AppError::Unauthorized(other.to_string())
            }
        }
    }
}

/// Decides whether a bearer token is valid.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `Ok(Some(user_id))` for a valid token, `Ok(None)` for a rejected one.
    async fn validate(&self, token: &str) -> Result<Option<String>, AuthError>;
}

#[derive(Serialize)]
struct ValidationRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct ValidationResponse {
    valid: bool,
    #[serde(default)]
    user: Option<ValidatedUser>,
}

#[derive(Deserialize)]
struct ValidatedUser {
    id: String,
}

/// Validator that asks the auth service at `{service_url}/api/v1/app/validate`.
#[derive(Debug, Clone)]
pub struct HttpTokenValidator {
    client: Client,
    validation_url: String,
}

impl HttpTokenValidator {
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AuthError::Validation(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            validation_url: format!(
                "{}/api/v1/app/validate",
                settings.service_url.trim_end_matches('/')
            ),
        })
    }

    pub fn validation_url(&self) -> &str {
        &self.validation_url
    }
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self, token: &str) -> Result<Option<String>, AuthError> {
        let response = self
            .client
            .post(&self.validation_url)
            .bearer_auth(token)
            .json(&ValidationRequest { token })
            .send()
            .await
            .map_err(|e| AuthError::Validation(format!("failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Validation(format!(
                "auth service returned status: {}",
                status.as_u16()
            )));
        }

        let body: ValidationResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Validation(format!("failed to decode response: {}", e)))?;

        if !body.valid {
            return Ok(None);
        }
        match body.user {
            Some(user) => Ok(Some(user.id)),
            None => Err(AuthError::Validation(
                "valid response but user data is missing".to_string(),
            )),
        }
    }
}

/// Fixed token → user table. Used by tests and local development.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, String>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user_id.into());
        self
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<Option<String>, AuthError> {
        Ok(self.tokens.get(token).cloned())
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header. The
/// scheme is matched case-insensitively.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let raw = header
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    match raw.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token)
        }
        _ => Err(AuthError::InvalidFormat),
    }
}

/// Middleware guarding student-specific routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers().get(AUTHORIZATION))?.to_string();

    let user_id = state
        .validator
        .validate(&token)
        .await?
        .ok_or(AuthError::Rejected)?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));
    Ok(next.run(request).await)
}
