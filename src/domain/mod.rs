//! Domain layer: the ticket record, validation, listing filters, and
//! chart aggregation.
//!
//! Nothing in here performs I/O.

pub mod aggregator;
pub mod filter;
pub mod ticket;

pub use aggregator::{TicketBreakdown, aggregate};
pub use filter::TicketFilter;
pub use ticket::{
    CreateTicketInput, NewTicket, Ticket, TicketChanges, TicketPriority, TicketStatus,
    UpdateTicketInput,
};
