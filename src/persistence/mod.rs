//! Persistence layer: the ticket store boundary and its backends.
//!
//! [`TicketStore`] is a keyed document collection queried by exact match.
//! The service only ever filters on the ticket `id` or on nothing at all,
//! so [`StoreFilter`] has exactly those two shapes. Two backends exist:
//! [`memory::MemoryTicketStore`] for tests and database-less runs, and
//! [`postgres::PostgresTicketStore`] backed by `sqlx::PgPool`.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Ticket;
use crate::error::TrackerError;

pub use memory::MemoryTicketStore;
pub use postgres::PostgresTicketStore;

/// Exact-match selector over stored tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFilter {
    /// Every ticket.
    All,
    /// Tickets whose `id` equals the value.
    ById(i64),
}

impl StoreFilter {
    /// Returns `true` when `ticket` is selected.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::ById(id) => ticket.id == *id,
        }
    }
}

/// Field replacement applied by [`TicketStore::update_one`].
///
/// `id` and `created_at` are not patchable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPatch {
    /// New client name.
    pub client_name: String,
    /// New title.
    pub title: String,
    /// New status.
    pub status: String,
    /// New priority.
    pub priority: String,
    /// New modification instant.
    pub updated_at: DateTime<Utc>,
}

impl TicketPatch {
    /// Writes the patch onto `ticket`.
    pub fn apply_to(&self, ticket: &mut Ticket) {
        ticket.client_name.clone_from(&self.client_name);
        ticket.title.clone_from(&self.title);
        ticket.status.clone_from(&self.status);
        ticket.priority.clone_from(&self.priority);
        ticket.updated_at = self.updated_at;
    }
}

/// Ticket storage backend.
///
/// Each call is a single store operation; no method spans another. The
/// store does not enforce uniqueness of `id` nor the status and priority
/// enumerations.
#[async_trait]
pub trait TicketStore: Send + Sync + fmt::Debug {
    /// Counts tickets selected by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn count(&self, filter: &StoreFilter) -> Result<u64, TrackerError>;

    /// Returns the first selected ticket in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn find_one(&self, filter: &StoreFilter) -> Result<Option<Ticket>, TrackerError>;

    /// Returns all selected tickets in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn find_all(&self, filter: &StoreFilter) -> Result<Vec<Ticket>, TrackerError>;

    /// Stores `ticket` and returns the document key assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn insert_one(&self, ticket: &Ticket) -> Result<Uuid, TrackerError>;

    /// Stores every ticket verbatim. Returns how many were inserted.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn insert_many(&self, tickets: &[Ticket]) -> Result<u64, TrackerError>;

    /// Applies `patch` to the first selected ticket. Returns the matched count (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn update_one(&self, filter: &StoreFilter, patch: &TicketPatch)
    -> Result<u64, TrackerError>;

    /// Removes the first selected ticket. Returns the deleted count (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the backend fails.
    async fn delete_one(&self, filter: &StoreFilter) -> Result<u64, TrackerError>;
}
