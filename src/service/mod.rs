//! Service layer: ticket lifecycle rules and bulk import.
//!
//! [`TicketService`] validates requests, assigns ticket numbers, and
//! delegates storage to a [`crate::persistence::TicketStore`].

pub mod import;
pub mod ticket_service;

pub use ticket_service::{CreatedTicket, TicketService, TicketStats};
