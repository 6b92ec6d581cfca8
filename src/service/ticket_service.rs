//! Ticket service: lifecycle rules on top of a [`TicketStore`].

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::domain::aggregator::{self, TicketBreakdown};
use crate::domain::{CreateTicketInput, Ticket, TicketStatus, UpdateTicketInput};
use crate::error::TrackerError;
use crate::persistence::{StoreFilter, TicketPatch, TicketStore};

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketStats {
    /// Every ticket in the store.
    pub total_tickets: u64,
    /// Tickets whose status is not exactly `closed`.
    pub open_tickets: u64,
}

/// A freshly created ticket and the store key it was filed under.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTicket {
    /// Key returned by [`TicketStore::insert_one`].
    pub document_id: Uuid,
    /// The stored record.
    pub ticket: Ticket,
}

/// Current instant at the microsecond precision of `TIMESTAMPTZ`.
fn store_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Owns the create / update / delete / list / stats rules for tickets.
///
/// Stateless apart from the injected store. Each operation is at most two
/// store calls and neither pair is atomic:
///
/// - `create` counts, then inserts. Two creates that observe the same count
///   receive the same id.
/// - `update` and `delete` look the ticket up, then mutate it. A delete that
///   lands in between makes the mutate match nothing; this is logged and the
///   operation still reports success.
#[derive(Debug, Clone)]
pub struct TicketService {
    store: Arc<dyn TicketStore>,
}

impl TicketService {
    /// Creates a `TicketService` over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }

    /// Validates `input` and files a new open ticket numbered `count + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MissingField`] or
    /// [`TrackerError::InvalidValue`] for bad input, and
    /// [`TrackerError::StoreError`] if the store fails.
    pub async fn create(&self, input: CreateTicketInput) -> Result<CreatedTicket, TrackerError> {
        let new_ticket = input.validate()?;

        let count = self.store.count(&StoreFilter::All).await?;
        let id = i64::try_from(count)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| TrackerError::Internal(format!("ticket count {count} out of range")))?;

        let now = store_now();
        let ticket = Ticket {
            id,
            client_name: new_ticket.client_name,
            title: new_ticket.title,
            status: TicketStatus::Open.as_str().to_string(),
            priority: new_ticket.priority.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        let document_id = self.store.insert_one(&ticket).await?;

        tracing::info!(ticket_id = id, %document_id, priority = %ticket.priority, "ticket created");
        Ok(CreatedTicket {
            document_id,
            ticket,
        })
    }

    /// Fetches the ticket numbered `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::TicketNotFound`] if it does not exist, or
    /// [`TrackerError::StoreError`] if the store fails.
    pub async fn get(&self, id: i64) -> Result<Ticket, TrackerError> {
        self.store
            .find_one(&StoreFilter::ById(id))
            .await?
            .ok_or(TrackerError::TicketNotFound(id))
    }

    /// Replaces client name, title, status and priority of ticket `id`, and
    /// refreshes `updated_at`. Returns the record as written.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MissingField`] or
    /// [`TrackerError::InvalidValue`] for bad input,
    /// [`TrackerError::TicketNotFound`] if the ticket does not exist, and
    /// [`TrackerError::StoreError`] if the store fails.
    pub async fn update(&self, id: i64, input: UpdateTicketInput) -> Result<Ticket, TrackerError> {
        let changes = input.validate()?;
        let filter = StoreFilter::ById(id);

        let mut ticket = self
            .store
            .find_one(&filter)
            .await?
            .ok_or(TrackerError::TicketNotFound(id))?;

        let patch = TicketPatch {
            client_name: changes.client_name,
            title: changes.title,
            status: changes.status.as_str().to_string(),
            priority: changes.priority.as_str().to_string(),
            updated_at: store_now().max(ticket.created_at),
        };

        let matched = self.store.update_one(&filter, &patch).await?;
        if matched == 0 {
            tracing::warn!(ticket_id = id, "ticket disappeared between lookup and update");
        } else {
            tracing::info!(ticket_id = id, status = %patch.status, "ticket updated");
        }

        patch.apply_to(&mut ticket);
        Ok(ticket)
    }

    /// Permanently removes ticket `id`. Deleting twice is an error.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::TicketNotFound`] if the ticket does not
    /// exist, or [`TrackerError::StoreError`] if the store fails.
    pub async fn delete(&self, id: i64) -> Result<(), TrackerError> {
        let filter = StoreFilter::ById(id);

        if self.store.find_one(&filter).await?.is_none() {
            return Err(TrackerError::TicketNotFound(id));
        }

        let deleted = self.store.delete_one(&filter).await?;
        if deleted == 0 {
            tracing::warn!(ticket_id = id, "ticket disappeared between lookup and delete");
        } else {
            tracing::info!(ticket_id = id, "ticket deleted");
        }
        Ok(())
    }

    /// Returns every ticket in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the store fails.
    pub async fn list_all(&self) -> Result<Vec<Ticket>, TrackerError> {
        self.store.find_all(&StoreFilter::All).await
    }

    /// Total and open ticket counts.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the store fails.
    pub async fn stats(&self) -> Result<TicketStats, TrackerError> {
        let tickets = self.store.find_all(&StoreFilter::All).await?;
        let total_tickets = tickets.len() as u64;
        let open_tickets = tickets.iter().filter(|t| !t.is_closed()).count() as u64;

        Ok(TicketStats {
            total_tickets,
            open_tickets,
        })
    }

    /// Chart buckets for every stored ticket, evaluated at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the store fails.
    pub async fn breakdown(&self, now: DateTime<Utc>) -> Result<TicketBreakdown, TrackerError> {
        let tickets = self.list_all().await?;
        Ok(aggregator::aggregate(&tickets, now))
    }

    /// Stores `tickets` verbatim, without validation or renumbering.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreError`] if the store fails.
    pub async fn import(&self, tickets: &[Ticket]) -> Result<u64, TrackerError> {
        let inserted = self.store.insert_many(tickets).await?;
        tracing::info!(inserted, "tickets imported");
        Ok(inserted)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::persistence::MemoryTicketStore;

    fn make_service() -> TicketService {
        TicketService::new(Arc::new(MemoryTicketStore::new()))
    }

    fn create_input(client: &str, title: &str, priority: &str) -> CreateTicketInput {
        CreateTicketInput {
            client_name: Some(client.to_string()),
            title: Some(title.to_string()),
            priority: Some(priority.to_string()),
        }
    }

    fn update_input(client: &str, title: &str, status: &str, priority: &str) -> UpdateTicketInput {
        UpdateTicketInput {
            client_name: Some(client.to_string()),
            title: Some(title.to_string()),
            status: Some(status.to_string()),
            priority: Some(priority.to_string()),
        }
    }

    async fn create(service: &TicketService, title: &str) -> Ticket {
        let Ok(created) = service.create(create_input("Acme", title, "medium")).await else {
            panic!("create failed");
        };
        created.ticket
    }

    #[tokio::test]
    async fn create_assigns_count_plus_one_and_opens() {
        let service = make_service();
        for expected in 1..=3 {
            let ticket = create(&service, "Printer jam").await;
            assert_eq!(ticket.id, expected);
            assert_eq!(ticket.status, "open");
            assert_eq!(ticket.created_at, ticket.updated_at);
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_insert() {
        let service = make_service();
        let input = CreateTicketInput {
            client_name: Some("Acme".to_string()),
            title: Some("  ".to_string()),
            priority: None,
        };
        match service.create(input).await {
            Err(TrackerError::MissingField(fields)) => assert_eq!(fields, vec!["title", "priority"]),
            other => panic!("expected MissingField, got {other:?}"),
        }
        assert_eq!(service.store().count(&StoreFilter::All).await.ok(), Some(0));
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = make_service();
        let Ok(created) = service.create(create_input("Acme", "VPN down", "critical")).await else {
            panic!("create failed");
        };
        let Ok(fetched) = service.get(created.ticket.id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched, created.ticket);
        assert_eq!(fetched.client_name, "Acme");
        assert_eq!(fetched.title, "VPN down");
        assert_eq!(fetched.priority, "critical");
        assert_eq!(fetched.status, "open");
    }

    #[tokio::test]
    async fn id_reuse_after_delete_follows_count() {
        let service = make_service();
        create(&service, "a").await;
        create(&service, "b").await;
        assert!(service.delete(1).await.is_ok());

        // One ticket left, so the next number is 2 again.
        let ticket = create(&service, "c").await;
        assert_eq!(ticket.id, 2);
        let Ok(all) = service.list_all().await else {
            panic!("list failed");
        };
        assert_eq!(all.iter().filter(|t| t.id == 2).count(), 2);
    }

    #[tokio::test]
    async fn update_overwrites_only_mutable_fields() {
        let service = make_service();
        let original = create(&service, "Printer jam").await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let Ok(updated) = service
            .update(original.id, update_input("Globex", "Printer fixed", "closed", "low"))
            .await
        else {
            panic!("update failed");
        };

        let Ok(fetched) = service.get(original.id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched, updated);
        assert_eq!(fetched.id, original.id);
        assert_eq!(fetched.created_at, original.created_at);
        assert!(fetched.updated_at > original.updated_at);
        assert_eq!(fetched.client_name, "Globex");
        assert_eq!(fetched.title, "Printer fixed");
        assert_eq!(fetched.status, "closed");
        assert_eq!(fetched.priority, "low");
    }

    #[tokio::test]
    async fn update_missing_ticket_is_not_found_and_mutates_nothing() {
        let service = make_service();
        let original = create(&service, "Printer jam").await;

        let result = service
            .update(99, update_input("Globex", "x", "closed", "low"))
            .await;
        assert!(matches!(result, Err(TrackerError::TicketNotFound(99))));

        let Ok(all) = service.list_all().await else {
            panic!("list failed");
        };
        assert_eq!(all, vec![original]);
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let service = make_service();
        let input = UpdateTicketInput {
            status: None,
            ..update_input("Globex", "x", "closed", "low")
        };
        assert!(matches!(
            service.update(99, input).await,
            Err(TrackerError::MissingField(fields)) if fields == vec!["status"]
        ));
    }

    #[tokio::test]
    async fn delete_is_not_idempotent() {
        let service = make_service();
        let ticket = create(&service, "Printer jam").await;

        assert!(service.delete(ticket.id).await.is_ok());
        assert!(matches!(
            service.delete(ticket.id).await,
            Err(TrackerError::TicketNotFound(_))
        ));
        assert!(matches!(
            service.get(ticket.id).await,
            Err(TrackerError::TicketNotFound(_))
        ));
    }

    #[tokio::test]
    async fn stats_count_everything_not_closed_as_open() {
        let service = make_service();
        for _ in 0..4 {
            create(&service, "t").await;
        }
        for (id, status) in [(2, "in_progress"), (3, "closed"), (4, "closed")] {
            let Ok(_) = service.update(id, update_input("Acme", "t", status, "low")).await else {
                panic!("update failed");
            };
        }

        let Ok(stats) = service.stats().await else {
            panic!("stats failed");
        };
        assert_eq!(
            stats,
            TicketStats {
                total_tickets: 4,
                open_tickets: 2
            }
        );
    }

    #[tokio::test]
    async fn stats_treat_unknown_status_as_open() {
        let service = make_service();
        let now = Utc::now();
        let imported = Ticket {
            id: 1,
            client_name: "Acme".to_string(),
            title: "legacy".to_string(),
            status: "archived".to_string(),
            priority: "low".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(service.import(&[imported]).await.ok(), Some(1));

        let Ok(stats) = service.stats().await else {
            panic!("stats failed");
        };
        assert_eq!(stats.open_tickets, 1);
    }

    /// Refuses `count`, so only a single `find_all` snapshot can answer.
    #[derive(Debug, Default)]
    struct NoCountStore {
        inner: MemoryTicketStore,
    }

    #[async_trait]
    impl TicketStore for NoCountStore {
        async fn count(&self, _filter: &StoreFilter) -> Result<u64, TrackerError> {
            Err(TrackerError::StoreError("count unavailable".to_string()))
        }
        async fn find_one(&self, filter: &StoreFilter) -> Result<Option<Ticket>, TrackerError> {
            self.inner.find_one(filter).await
        }
        async fn find_all(&self, filter: &StoreFilter) -> Result<Vec<Ticket>, TrackerError> {
            self.inner.find_all(filter).await
        }
        async fn insert_one(&self, ticket: &Ticket) -> Result<Uuid, TrackerError> {
            self.inner.insert_one(ticket).await
        }
        async fn insert_many(&self, tickets: &[Ticket]) -> Result<u64, TrackerError> {
            self.inner.insert_many(tickets).await
        }
        async fn update_one(
            &self,
            filter: &StoreFilter,
            patch: &TicketPatch,
        ) -> Result<u64, TrackerError> {
            self.inner.update_one(filter, patch).await
        }
        async fn delete_one(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
            self.inner.delete_one(filter).await
        }
    }

    #[tokio::test]
    async fn stats_derive_both_counts_from_one_read() {
        let service = TicketService::new(Arc::new(NoCountStore::default()));
        let now = Utc::now();
        let tickets: Vec<Ticket> = [(1, "open"), (2, "closed"), (3, "in_progress")]
            .into_iter()
            .map(|(id, status)| Ticket {
                id,
                client_name: "Acme".to_string(),
                title: "t".to_string(),
                status: status.to_string(),
                priority: "low".to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        assert_eq!(service.import(&tickets).await.ok(), Some(3));

        let Ok(stats) = service.stats().await else {
            panic!("stats failed");
        };
        assert_eq!(
            stats,
            TicketStats {
                total_tickets: 3,
                open_tickets: 2
            }
        );
    }

    #[tokio::test]
    async fn timestamps_fit_microsecond_storage() {
        let service = make_service();
        let ticket = create(&service, "Printer jam").await;
        assert_eq!(ticket.created_at.timestamp_subsec_nanos() % 1_000, 0);

        let Ok(updated) = service
            .update(ticket.id, update_input("Acme", "t", "closed", "low"))
            .await
        else {
            panic!("update failed");
        };
        assert_eq!(updated.updated_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[tokio::test]
    async fn breakdown_reads_the_whole_store() {
        let service = make_service();
        create(&service, "a").await;
        create(&service, "b").await;

        let Ok(breakdown) = service.breakdown(Utc::now()).await else {
            panic!("breakdown failed");
        };
        assert_eq!(breakdown.recent_counts.get("medium"), Some(&2));
        assert_eq!(breakdown.active_tickets.len(), 2);
    }

    /// Holds every `count` call until two callers have read the count.
    #[derive(Debug)]
    struct CountBarrierStore {
        inner: MemoryTicketStore,
        barrier: Barrier,
    }

    #[async_trait]
    impl TicketStore for CountBarrierStore {
        async fn count(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
            let count = self.inner.count(filter).await;
            self.barrier.wait().await;
            count
        }
        async fn find_one(&self, filter: &StoreFilter) -> Result<Option<Ticket>, TrackerError> {
            self.inner.find_one(filter).await
        }
        async fn find_all(&self, filter: &StoreFilter) -> Result<Vec<Ticket>, TrackerError> {
            self.inner.find_all(filter).await
        }
        async fn insert_one(&self, ticket: &Ticket) -> Result<Uuid, TrackerError> {
            self.inner.insert_one(ticket).await
        }
        async fn insert_many(&self, tickets: &[Ticket]) -> Result<u64, TrackerError> {
            self.inner.insert_many(tickets).await
        }
        async fn update_one(
            &self,
            filter: &StoreFilter,
            patch: &TicketPatch,
        ) -> Result<u64, TrackerError> {
            self.inner.update_one(filter, patch).await
        }
        async fn delete_one(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
            self.inner.delete_one(filter).await
        }
    }

    #[tokio::test]
    async fn concurrent_creates_can_share_an_id() {
        let service = TicketService::new(Arc::new(CountBarrierStore {
            inner: MemoryTicketStore::new(),
            barrier: Barrier::new(2),
        }));

        let (a, b) = tokio::join!(
            service.create(create_input("Acme", "a", "low")),
            service.create(create_input("Globex", "b", "high")),
        );
        let (Ok(a), Ok(b)) = (a, b) else {
            panic!("concurrent creates failed");
        };

        assert_eq!(a.ticket.id, 1);
        assert_eq!(b.ticket.id, 1);
        assert_ne!(a.document_id, b.document_id);
    }

    /// Deletes the looked-up ticket right after `find_one` returns it.
    #[derive(Debug, Default)]
    struct VanishingStore {
        inner: MemoryTicketStore,
    }

    #[async_trait]
    impl TicketStore for VanishingStore {
        async fn count(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
            self.inner.count(filter).await
        }
        async fn find_one(&self, filter: &StoreFilter) -> Result<Option<Ticket>, TrackerError> {
            let found = self.inner.find_one(filter).await?;
            self.inner.delete_one(filter).await?;
            Ok(found)
        }
        async fn find_all(&self, filter: &StoreFilter) -> Result<Vec<Ticket>, TrackerError> {
            self.inner.find_all(filter).await
        }
        async fn insert_one(&self, ticket: &Ticket) -> Result<Uuid, TrackerError> {
            self.inner.insert_one(ticket).await
        }
        async fn insert_many(&self, tickets: &[Ticket]) -> Result<u64, TrackerError> {
            self.inner.insert_many(tickets).await
        }
        async fn update_one(
            &self,
            filter: &StoreFilter,
            patch: &TicketPatch,
        ) -> Result<u64, TrackerError> {
            self.inner.update_one(filter, patch).await
        }
        async fn delete_one(&self, filter: &StoreFilter) -> Result<u64, TrackerError> {
            self.inner.delete_one(filter).await
        }
    }

    #[tokio::test]
    async fn update_after_concurrent_delete_matches_nothing_silently() {
        let service = TicketService::new(Arc::new(VanishingStore::default()));
        let ticket = create(&service, "Printer jam").await;

        let result = service
            .update(ticket.id, update_input("Acme", "x", "closed", "low"))
            .await;
        assert!(result.is_ok());
        assert_eq!(service.store().count(&StoreFilter::All).await.ok(), Some(0));
    }
}
