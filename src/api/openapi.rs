//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    BreakdownResponse, ChartSeries, CreateTicketResponse, DeleteTicketResponse, ImportResponse,
    StatsResponse, TicketResponse,
};
use super::handlers::{stats, system, ticket};
use crate::domain::{CreateTicketInput, TicketPriority, TicketStatus, UpdateTicketInput};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "ticket-tracker",
        description = "IT support ticket tracking: lifecycle, statistics and chart breakdowns."
    ),
    paths(
        ticket::create_ticket,
        ticket::list_tickets,
        ticket::get_ticket,
        ticket::update_ticket,
        ticket::delete_ticket,
        ticket::import_tickets,
        stats::ticket_stats,
        stats::ticket_breakdown,
        system::health_handler,
    ),
    components(schemas(
        CreateTicketInput,
        UpdateTicketInput,
        TicketStatus,
        TicketPriority,
        TicketResponse,
        CreateTicketResponse,
        DeleteTicketResponse,
        ImportResponse,
        StatsResponse,
        ChartSeries,
        BreakdownResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Tickets", description = "Ticket lifecycle"),
        (name = "Statistics", description = "Dashboard counts and charts"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
