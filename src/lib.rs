//! # ticket-tracker
//!
//! REST service for IT support tickets: create, list, filter, edit and
//! delete tickets, and derive dashboard statistics and chart buckets.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── TicketService (service/)
//!     ├── Aggregator, filters, validation (domain/)
//!     │
//!     └── TicketStore (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
