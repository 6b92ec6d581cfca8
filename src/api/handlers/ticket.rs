//! Ticket CRUD handlers: create, list, get, update, delete, import.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateTicketResponse, DeleteTicketResponse, ImportResponse, TicketResponse};
use crate::api::extract::{TicketId, TicketJson};
use crate::app_state::AppState;
use crate::domain::{CreateTicketInput, TicketFilter, UpdateTicketInput};
use crate::error::{ErrorResponse, TrackerError};
use crate::service::import;

/// `POST /tickets` — Open a new ticket.
///
/// # Errors
///
/// Returns [`TrackerError`] on missing or invalid fields, or store failure.
#[utoipa::path(
    post,
    path = "/tickets",
    tag = "Tickets",
    summary = "Create a ticket",
    description = "Creates an open ticket numbered one past the current ticket count. Any status in the body is ignored.",
    request_body = CreateTicketInput,
    responses(
        (status = 201, description = "Ticket created", body = CreateTicketResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    TicketJson(req): TicketJson<CreateTicketInput>,
) -> Result<impl IntoResponse, TrackerError> {
    let created = state.ticket_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(CreateTicketResponse::from(created))))
}

/// `GET /tickets` — List tickets, optionally filtered.
///
/// # Errors
///
/// Returns [`TrackerError::StoreError`] on store failure.
#[utoipa::path(
    get,
    path = "/tickets",
    tag = "Tickets",
    summary = "List tickets",
    description = "Returns every ticket in store order. Query parameters narrow the list; `sort=id` orders by ticket number.",
    params(TicketFilter),
    responses(
        (status = 200, description = "Ticket list", body = Vec<TicketResponse>),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(filter): Query<TicketFilter>,
) -> Result<impl IntoResponse, TrackerError> {
    let tickets = state.ticket_service.list_all().await?;
    let data: Vec<TicketResponse> = filter
        .apply(tickets)
        .into_iter()
        .map(TicketResponse::from)
        .collect();
    Ok(Json(data))
}

/// `GET /tickets/:id` — Fetch one ticket.
///
/// # Errors
///
/// Returns [`TrackerError::TicketNotFound`] if the ticket does not exist.
#[utoipa::path(
    get,
    path = "/tickets/{id}",
    tag = "Tickets",
    summary = "Get a ticket",
    params(
        ("id" = i64, Path, description = "Ticket number"),
    ),
    responses(
        (status = 200, description = "Ticket", body = TicketResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    TicketId(id): TicketId,
) -> Result<impl IntoResponse, TrackerError> {
    let ticket = state.ticket_service.get(id).await?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// `PUT /tickets/:id` — Replace a ticket's editable fields.
///
/// # Errors
///
/// Returns [`TrackerError`] on missing or invalid fields, unknown ticket,
/// or store failure.
#[utoipa::path(
    put,
    path = "/tickets/{id}",
    tag = "Tickets",
    summary = "Update a ticket",
    description = "Overwrites client name, title, status and priority, and refreshes `updated_at`.",
    params(
        ("id" = i64, Path, description = "Ticket number"),
    ),
    request_body = UpdateTicketInput,
    responses(
        (status = 200, description = "Ticket updated", body = TicketResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    TicketId(id): TicketId,
    TicketJson(req): TicketJson<UpdateTicketInput>,
) -> Result<impl IntoResponse, TrackerError> {
    let ticket = state.ticket_service.update(id, req).await?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// `DELETE /tickets/:id` — Remove a ticket permanently.
///
/// # Errors
///
/// Returns [`TrackerError::TicketNotFound`] if the ticket does not exist.
#[utoipa::path(
    delete,
    path = "/tickets/{id}",
    tag = "Tickets",
    summary = "Delete a ticket",
    params(
        ("id" = i64, Path, description = "Ticket number"),
    ),
    responses(
        (status = 200, description = "Ticket deleted", body = DeleteTicketResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    TicketId(id): TicketId,
) -> Result<impl IntoResponse, TrackerError> {
    state.ticket_service.delete(id).await?;
    Ok(Json(DeleteTicketResponse {
        message: "Ticket deleted successfully".to_string(),
        id,
    }))
}

/// `POST /tickets/import` — Bulk-insert tickets from CSV.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidImport`] on unparsable CSV, or
/// [`TrackerError::StoreError`] on store failure.
#[utoipa::path(
    post,
    path = "/tickets/import",
    tag = "Tickets",
    summary = "Import tickets from CSV",
    description = "Header `id,client_name,title,status,priority,created_at,updated_at`. Rows are stored as given.",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Rows imported", body = ImportResponse),
        (status = 400, description = "Unparsable CSV", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn import_tickets(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, TrackerError> {
    let tickets = import::parse_csv(&body)?;
    let inserted_count = state.ticket_service.import(&tickets).await?;
    Ok(Json(ImportResponse { inserted_count }))
}

/// Ticket resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(create_ticket).get(list_tickets))
        .route("/tickets/import", post(import_tickets))
        .route(
            "/tickets/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
}
