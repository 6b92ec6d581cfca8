//! Chart statistics derived from a ticket collection.
//!
//! [`aggregate`] is a pure function: it takes the tickets and the evaluation
//! instant and rebuilds every bucket from scratch on each call. Priorities
//! are tallied under whatever string the ticket carries; only the fixed-axis
//! projections restrict output to [`PRIORITY_AXIS`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::ticket::{Ticket, TicketPriority};

/// Tickets untouched for longer than this many days are overdue.
pub const OVERDUE_THRESHOLD_DAYS: f64 = 5.0;

/// Chart axis order for per-priority projections.
pub const PRIORITY_AXIS: [TicketPriority; 4] = TicketPriority::ALL;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Per-priority tallies keyed by the raw priority string.
pub type PriorityCounts = BTreeMap<String, u64>;

/// Full breakdown of a ticket collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct TicketBreakdown {
    /// Every ticket, by priority.
    pub priority_counts: BTreeMap<String, u64>,
    /// Tickets last updated more than [`OVERDUE_THRESHOLD_DAYS`] ago.
    pub overdue_counts: BTreeMap<String, u64>,
    /// Tickets updated within [`OVERDUE_THRESHOLD_DAYS`].
    pub recent_counts: BTreeMap<String, u64>,
    /// Closed tickets, by priority.
    pub closed_priority_counts: BTreeMap<String, u64>,
    /// Tickets whose status is anything but `closed`.
    pub active_tickets: Vec<Ticket>,
    /// Tickets whose status is exactly `closed`.
    pub closed_tickets: Vec<Ticket>,
}

impl TicketBreakdown {
    /// Active count followed by closed counts along [`PRIORITY_AXIS`].
    #[must_use]
    pub fn closed_vs_open(&self) -> [u64; 5] {
        let [low, medium, high, critical] = project(&self.closed_priority_counts);
        [
            self.active_tickets.len() as u64,
            low,
            medium,
            high,
            critical,
        ]
    }
}

/// Days between `updated_at` and `now`, fractional.
#[must_use]
pub fn days_since_update(ticket: &Ticket, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = (now - ticket.updated_at).num_milliseconds() as f64;
    millis / MILLIS_PER_DAY
}

/// Buckets `tickets` relative to `now`.
#[must_use]
pub fn aggregate(tickets: &[Ticket], now: DateTime<Utc>) -> TicketBreakdown {
    let mut breakdown = TicketBreakdown::default();

    for ticket in tickets {
        bump(&mut breakdown.priority_counts, &ticket.priority);

        if days_since_update(ticket, now) > OVERDUE_THRESHOLD_DAYS {
            bump(&mut breakdown.overdue_counts, &ticket.priority);
        } else {
            bump(&mut breakdown.recent_counts, &ticket.priority);
        }

        if ticket.is_closed() {
            bump(&mut breakdown.closed_priority_counts, &ticket.priority);
            breakdown.closed_tickets.push(ticket.clone());
        } else {
            breakdown.active_tickets.push(ticket.clone());
        }
    }

    breakdown
}

/// Projects `counts` onto [`PRIORITY_AXIS`]. Missing keys read as zero and
/// keys outside the axis are dropped.
#[must_use]
pub fn project(counts: &PriorityCounts) -> [u64; 4] {
    PRIORITY_AXIS.map(|priority| counts.get(priority.as_str()).copied().unwrap_or(0))
}

fn bump(counts: &mut PriorityCounts, key: &str) {
    *counts.entry(key.to_string()).or_insert(0) += 1;
}
