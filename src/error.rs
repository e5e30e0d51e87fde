//! Error types for the Account Directory Gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::platform::PlatformError;

/// Error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing or malformed required input. Caller-facing, not logged.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed serialized input (e.g. a filter expression). Surfaced to
    /// the caller as-is, no local recovery.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No caller identity on the request.
    #[error("Authentication required")]
    Unauthorized,

    /// Caller lacks a required role. Caller-facing, not logged.
    #[error("{0}")]
    Forbidden(String),

    /// Target record absent, raised by the platform and propagated.
    #[error("{0}")]
    NotFound(String),

    /// Failure during a mutating platform call, already recorded in the
    /// platform's diagnostic log, carrying the original message text.
    #[error("{0}")]
    Platform(String),
}

impl From<PlatformError> for GatewayError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NotFound { .. } => Self::NotFound(err.to_string()),
            PlatformError::Upstream(message) => Self::Platform(message),
        }
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    fn new(problem_type: &str, title: &str, status: StatusCode, detail: String) -> Self {
        Self {
            problem_type: format!("https://gateway.example.com/problems/{problem_type}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            GatewayError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            GatewayError::Parse(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "parse-error",
                    "Parse Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            GatewayError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "unauthorized",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid caller identity".to_string(),
                ),
            ),
            GatewayError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ProblemDetails::new(
                    "forbidden",
                    "Forbidden",
                    StatusCode::FORBIDDEN,
                    msg.clone(),
                ),
            ),
            GatewayError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    msg.clone(),
                ),
            ),
            GatewayError::Platform(msg) => {
                tracing::error!("Platform error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ProblemDetails::new(
                        "platform-error",
                        "Platform Error",
                        StatusCode::BAD_GATEWAY,
                        msg.clone(),
                    ),
                )
            }
        };

        (status, Json(problem)).into_response()
    }
}
