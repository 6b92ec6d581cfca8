//! Ticket DTOs for create, read, update, delete and import.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Ticket;
use crate::service::CreatedTicket;

/// A ticket as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketResponse {
    /// Sequential ticket number.
    pub id: i64,
    /// Client name.
    pub client_name: String,
    /// Ticket title.
    pub title: String,
    /// Lifecycle state.
    pub status: String,
    /// Urgency.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            client_name: ticket.client_name,
            title: ticket.title,
            status: ticket.status,
            priority: ticket.priority,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

/// Response body for `POST /tickets` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTicketResponse {
    /// Store key of the new document.
    pub document_id: Uuid,
    /// The created ticket.
    #[serde(flatten)]
    pub ticket: TicketResponse,
}

impl From<CreatedTicket> for CreateTicketResponse {
    fn from(created: CreatedTicket) -> Self {
        Self {
            document_id: created.document_id,
            ticket: created.ticket.into(),
        }
    }
}

/// Response body for `DELETE /tickets/:id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTicketResponse {
    /// Confirmation text.
    pub message: String,
    /// Number of the deleted ticket.
    pub id: i64,
}

/// Response body for `POST /tickets/import`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Rows stored.
    pub inserted_count: u64,
}
