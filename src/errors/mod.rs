//! Error handling module for the sync service.
//!
//! Provides centralized error types with mapping to HTTP status codes and the two
//! response envelopes the endpoints speak.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// RFC 3339 UTC timestamp with millisecond precision (`...Z`).
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Detail line attached to proxy and chat failures.
pub const DETAILS_HINT: &str = "Check function logs for more information";

/// Application error type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    /// Webhook signature mismatch
    #[error("{0}")]
    Unauthorized(String),
    /// Missing or invalid request fields
    #[error("{0}")]
    Validation(String),
    /// Non-2xx or transport failure from the CMS, search index or LLM API
    #[error("{0}")]
    Upstream(String),
    /// A required credential or setting is absent or malformed
    #[error("{0}")]
    Config(String),
    /// Request or upstream body could not be decoded
    #[error("{0}")]
    Parse(String),
    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_)
            | AppError::Config(_)
            | AppError::Parse(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Upstream(_) => codes::UPSTREAM_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Parse(_) => codes::PARSE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("HTTP client error: {:?}", err);
        AppError::Upstream(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        AppError::Parse(format!("JSON error: {}", err))
    }
}

/// `{success: false, error, timestamp}` envelope used by the webhook and analysis endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl FailureResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            timestamp: timestamp(),
        }
    }
}

/// Error that renders as a [`FailureResponse`].
#[derive(Debug)]
pub struct Failure(pub AppError);

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Failure(err)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        (status, Json(FailureResponse::new(&self.0))).into_response()
    }
}

/// `{error, details}` envelope used by the CMS proxy and chat endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyErrorResponse {
    pub error: String,
    pub details: String,
}

/// Error that renders as a [`ProxyErrorResponse`], always with status 500.
#[derive(Debug)]
pub struct ProxyFailure(pub AppError);

impl From<AppError> for ProxyFailure {
    fn from(err: AppError) -> Self {
        ProxyFailure(err)
    }
}

impl IntoResponse for ProxyFailure {
    fn into_response(self) -> Response {
        let body = ProxyErrorResponse {
            error: self.0.to_string(),
            details: DETAILS_HINT.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Parse("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let body = FailureResponse::new(&AppError::Upstream("Storyblok API error: 404".into()));
        assert!(!body.success);
        assert_eq!(body.error, "Storyblok API error: 404");
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[test]
    fn test_timestamp_is_utc_millis() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-05-01T10:00:00.000Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_proxy_failure_is_always_500() {
        for err in [
            AppError::Validation("Missing parameter: spaceId".into()),
            AppError::Unauthorized("x".into()),
            AppError::Upstream("Storyblok API error: 404".into()),
        ] {
            let response = ProxyFailure(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
