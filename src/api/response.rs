//! Response types for the Time Attendance Engine API.
//!
//! This module defines the response bodies, the error response structures
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceWindow, HoursSummary, WorkUpdate};

/// Hours for one week of a user hours query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// Inclusive week start, in the configured offset.
    pub window_start: DateTime<FixedOffset>,
    /// Exclusive week end, in the configured offset.
    pub window_end: DateTime<FixedOffset>,
    /// The week's summary.
    pub summary: HoursSummary,
    /// Work updates dated within the week.
    pub updates: usize,
}

impl WeeklyHours {
    /// Pairs a window with its summary and counts the updates it contains.
    pub fn new(window: &AttendanceWindow, summary: HoursSummary, updates: &[WorkUpdate]) -> Self {
        Self {
            window_start: window.local_start(),
            window_end: window.local_end(),
            summary,
            updates: updates
                .iter()
                .filter(|update| window.contains_local_date(update.update_date))
                .count(),
        }
    }
}

/// Response body for the `/users/:user_id/hours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHoursResponse {
    /// The user queried.
    pub user_id: String,
    /// One entry per week, oldest first.
    pub weeks: Vec<WeeklyHours>,
    /// All weeks merged; the total is rounded once from the combined raw hours.
    pub combined: HoursSummary,
    /// Work updates across all weeks.
    pub updates: usize,
}

/// Response body for the `/health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is answering.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    /// The healthy response for this build.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::InvalidPunch { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PUNCH",
                    format!("Invalid punch field '{}': {}", field, message),
                    "The punch data contains invalid information",
                ),
            },
            EngineError::InvalidWorkUpdate { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "INVALID_WORK_UPDATE",
                    format!("Invalid work update field '{}': {}", field, message),
                ),
            },
            EngineError::InvalidWindow { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_WINDOW", format!("Invalid window: {}", message)),
            },
            EngineError::SourceUnavailable { message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "SOURCE_UNAVAILABLE",
                    "Source unavailable",
                    message,
                ),
            },
            EngineError::SourceTimeout { timeout_ms } => ApiErrorResponse {
                status: StatusCode::GATEWAY_TIMEOUT,
                error: ApiError::new(
                    "SOURCE_TIMEOUT",
                    format!("Source did not answer within {}ms", timeout_ms),
                ),
            },
        }
    }
}
