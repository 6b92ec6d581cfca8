//! Dashboard handlers: headline counts and chart breakdown.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{BreakdownResponse, StatsResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, TrackerError};

/// `GET /tickets/stats` — Total and open ticket counts.
///
/// # Errors
///
/// Returns [`TrackerError::StoreError`] on store failure.
#[utoipa::path(
    get,
    path = "/tickets/stats",
    tag = "Statistics",
    summary = "Ticket counts",
    description = "`openTickets` counts every ticket whose status is not exactly `closed`.",
    responses(
        (status = 200, description = "Counts", body = StatsResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn ticket_stats(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let stats = state.ticket_service.stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// `GET /tickets/breakdown` — Per-priority chart buckets as of now.
///
/// # Errors
///
/// Returns [`TrackerError::StoreError`] on store failure.
#[utoipa::path(
    get,
    path = "/tickets/breakdown",
    tag = "Statistics",
    summary = "Chart breakdown",
    description = "Buckets tickets by priority, overdue (> 5 days since update) versus recent, and closed versus active.",
    responses(
        (status = 200, description = "Breakdown", body = BreakdownResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn ticket_breakdown(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let breakdown = state.ticket_service.breakdown(Utc::now()).await?;
    Ok(Json(BreakdownResponse::from(breakdown)))
}

/// Statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tickets/stats", get(ticket_stats))
        .route("/tickets/breakdown", get(ticket_breakdown))
}
