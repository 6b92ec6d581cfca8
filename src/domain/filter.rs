//! Optional narrowing of a ticket listing.
//!
//! An empty [`TicketFilter`] keeps every ticket in the order given.

use chrono::SecondsFormat;
use serde::Deserialize;
use utoipa::IntoParams;

use super::ticket::Ticket;

/// List filter. Blank criteria are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketFilter {
    /// Case-insensitive substring of the client name.
    #[serde(default)]
    pub client_name: Option<String>,
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub title: Option<String>,
    /// Exact status.
    #[serde(default)]
    pub status: Option<String>,
    /// Exact priority.
    #[serde(default)]
    pub priority: Option<String>,
    /// Prefix of the ISO-8601 creation timestamp, e.g. `2025-03` or `2025-03-14`.
    #[serde(default)]
    pub created_date: Option<String>,
    /// `id` sorts ascending by ticket number.
    #[serde(default)]
    pub sort: Option<String>,
}

impl TicketFilter {
    /// Returns `true` when `ticket` satisfies every non-blank criterion.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        contains_ci(&ticket.client_name, self.client_name.as_deref())
            && contains_ci(&ticket.title, self.title.as_deref())
            && equals(&ticket.status, self.status.as_deref())
            && equals(&ticket.priority, self.priority.as_deref())
            && self.created_on(ticket)
    }

    /// Keeps matching tickets, sorted by id when requested.
    #[must_use]
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        let mut kept: Vec<Ticket> = tickets.into_iter().filter(|t| self.matches(t)).collect();
        if self.sort.as_deref() == Some("id") {
            kept.sort_by_key(|t| t.id);
        }
        kept
    }

    fn created_on(&self, ticket: &Ticket) -> bool {
        match non_blank(self.created_date.as_deref()) {
            None => true,
            Some(prefix) => ticket
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .starts_with(prefix),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    non_blank(needle).is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

fn equals(value: &str, wanted: Option<&str>) -> bool {
    non_blank(wanted).is_none_or(|w| value == w)
}
