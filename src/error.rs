//! Tracker error types with HTTP status code mapping.
//!
//! [`TrackerError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "missing required field(s): title",
///     "details": "title"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3999 | Server     | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// One or more required fields were absent or blank.
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    /// A field carried a value outside its allowed set.
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The request body was not a JSON object of the expected shape.
    #[error("invalid request body: {0}")]
    MalformedBody(String),

    /// A bulk import payload could not be parsed.
    #[error("invalid import data: {0}")]
    InvalidImport(String),

    /// No ticket carries the given id.
    #[error("ticket not found: {0}")]
    TicketNotFound(i64),

    /// The path segment is not a ticket number, so no ticket can match it.
    #[error("ticket not found: {0:?}")]
    MalformedTicketId(String),

    /// Store or connection failure.
    #[error("store error: {0}")]
    StoreError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingField(_) => 1001,
            Self::InvalidValue { .. } | Self::MalformedBody(_) => 1002,
            Self::InvalidImport(_) => 1003,
            Self::TicketNotFound(_) | Self::MalformedTicketId(_) => 2001,
            Self::StoreError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::InvalidValue { .. }
            | Self::MalformedBody(_)
            | Self::InvalidImport(_) => StatusCode::BAD_REQUEST,
            Self::TicketNotFound(_) | Self::MalformedTicketId(_) => StatusCode::NOT_FOUND,
            Self::StoreError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::MissingField(fields) => Some(fields.join(",")),
            Self::InvalidValue { field, .. } => Some((*field).to_string()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for TrackerError {
    fn from(e: sqlx::Error) -> Self {
        Self::StoreError(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for TrackerError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::StoreError(format!("migration failed: {e}"))
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_lists_every_field() {
        let err = TrackerError::MissingField(vec!["client_name", "priority"]);
        assert_eq!(
            err.to_string(),
            "missing required field(s): client_name, priority"
        );
        assert_eq!(err.details().as_deref(), Some("client_name,priority"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_codes_follow_category() {
        assert_eq!(
            TrackerError::TicketNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TrackerError::StoreError("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(TrackerError::TicketNotFound(7).error_code(), 2001);
    }

    #[test]
    fn extractor_failures_stay_in_their_category() {
        let body = TrackerError::MalformedBody("expected a string".into());
        assert_eq!(body.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body.error_code(), 1002);

        let id = TrackerError::MalformedTicketId("abc".into());
        assert_eq!(id.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(id.error_code(), 2001);
        assert_eq!(id.to_string(), "ticket not found: \"abc\"");
    }

    #[test]
    fn into_response_sets_status() {
        let response = TrackerError::TicketNotFound(3).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
