//! Request extractors whose rejections render as [`TrackerError`].
//!
//! axum's own `Json` and `Path` reject with plain-text bodies and statuses
//! outside the API's error table (415, 422). These wrappers keep every
//! failure in the `{"error": {...}}` shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::TrackerError;

/// JSON request body. Any rejection becomes [`TrackerError::MalformedBody`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketJson<T>(pub T);

impl<T, S> FromRequest<S> for TicketJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TrackerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_error(&rejection)),
        }
    }
}

fn body_error(rejection: &JsonRejection) -> TrackerError {
    tracing::debug!(status = %rejection.status(), "rejected request body");
    TrackerError::MalformedBody(rejection.body_text())
}

/// The `{id}` path segment as a ticket number.
///
/// A segment that is not an integer cannot name any ticket, so it is
/// rejected as not found rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketId(pub i64);

impl<S> FromRequestParts<S> for TicketId
where
    S: Send + Sync,
{
    type Rejection = TrackerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| TrackerError::MalformedTicketId(rejection.body_text()))?;
        parse_ticket_id(&raw).map(Self)
    }
}

fn parse_ticket_id(raw: &str) -> Result<i64, TrackerError> {
    raw.parse()
        .map_err(|_| TrackerError::MalformedTicketId(raw.to_string()))
}
