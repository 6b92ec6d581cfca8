//! In-process ticket store.
//!
//! Documents live in a `Vec` behind a [`tokio::sync::RwLock`]; insertion
//! order is the store order. Used by tests and when persistence is disabled.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreFilter, TicketPatch, TicketStore};
use crate::domain::Ticket;
use crate::error::TrackerError;

#[derive(Debug, Clone)]
struct Document {
    key: Uuid,
    ticket: Ticket,
}

/// Volatile [`TicketStore`]. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTicketStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryTicketStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn count(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
        let docs = self.documents.read().await;
        Ok(docs.iter().filter(|d| filter.matches(&d.ticket)).count() as u64)
    }

    async fn find_one(&self, filter: &StoreFilter) -> Result<Option<Ticket>, TrackerError> {
        let docs = self.documents.read().await;
        Ok(docs
            .iter()
            .find(|d| filter.matches(&d.ticket))
            .map(|d| d.ticket.clone()))
    }

    async fn find_all(&self, filter: &StoreFilter) -> Result<Vec<Ticket>, TrackerError> {
        let docs = self.documents.read().await;
        Ok(docs
            .iter()
            .filter(|d| filter.matches(&d.ticket))
            .map(|d| d.ticket.clone())
            .collect())
    }

    async fn insert_one(&self, ticket: &Ticket) -> Result<Uuid, TrackerError> {
        let key = Uuid::new_v4();
        self.documents.write().await.push(Document {
            key,
            ticket: ticket.clone(),
        });
        Ok(key)
    }

    async fn insert_many(&self, tickets: &[Ticket]) -> Result<u64, TrackerError> {
        let mut docs = self.documents.write().await;
        docs.extend(tickets.iter().map(|ticket| Document {
            key: Uuid::new_v4(),
            ticket: ticket.clone(),
        }));
        Ok(tickets.len() as u64)
    }

    async fn update_one(
        &self,
        filter: &StoreFilter,
        patch: &TicketPatch,
    ) -> Result<u64, TrackerError> {
        let mut docs = self.documents.write().await;
        match docs.iter_mut().find(|d| filter.matches(&d.ticket)) {
            Some(doc) => {
                patch.apply_to(&mut doc.ticket);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
        let mut docs = self.documents.write().await;
        match docs.iter().position(|d| filter.matches(&d.ticket)) {
            Some(index) => {
                let removed = docs.remove(index);
                tracing::debug!(document = %removed.key, ticket_id = removed.ticket.id, "document removed");
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
