//! The ticket record, its enumerations, and request validation.
//!
//! [`Ticket`] keeps `status` and `priority` as plain strings: the store does
//! not enforce the enumerations, and bulk-imported or legacy records may
//! carry any value. [`TicketStatus`] and [`TicketPriority`] are the allowed
//! domain values and are enforced only when input passes through
//! [`CreateTicketInput::validate`] or [`UpdateTicketInput::validate`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::TrackerError;

/// A support ticket as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// Sequential ticket number, assigned at creation.
    pub id: i64,
    /// Name of the client who raised the ticket.
    pub client_name: String,
    /// Short summary of the request.
    pub title: String,
    /// Lifecycle state (`open`, `in_progress`, `closed`).
    pub status: String,
    /// Urgency (`low`, `medium`, `high`, `critical`).
    pub priority: String,
    /// Creation instant. Never changes.
    pub created_at: DateTime<Utc>,
    /// Last successful update.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Returns `true` when the status is exactly `"closed"`.
    ///
    /// Every other value, including unrecognized ones, counts as open.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed.as_str()
    }
}

/// Allowed ticket states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly created, not yet picked up.
    Open,
    /// Being worked on.
    InProgress,
    /// Resolved.
    Closed,
}

impl TicketStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TrackerError::InvalidValue {
                field: "status",
                value: s.to_string(),
            })
    }
}

/// Allowed ticket priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Can wait.
    Low,
    /// Normal queue.
    Medium,
    /// Needs attention soon.
    High,
    /// Service down.
    Critical,
}

impl TicketPriority {
    /// All priorities in ascending urgency. This is also the chart axis order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| TrackerError::InvalidValue {
                field: "priority",
                value: s.to_string(),
            })
    }
}

/// Raw create request. Every field may be absent; [`Self::validate`]
/// decides what is acceptable.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTicketInput {
    /// Client name.
    #[serde(default)]
    pub client_name: Option<String>,
    /// Ticket title.
    #[serde(default)]
    pub title: Option<String>,
    /// One of `low`, `medium`, `high`, `critical`.
    #[serde(default)]
    pub priority: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Trimmed client name.
    pub client_name: String,
    /// Trimmed title.
    pub title: String,
    /// Parsed priority.
    pub priority: TicketPriority,
}

impl CreateTicketInput {
    /// Checks required fields and the priority value.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MissingField`] naming every absent or blank
    /// field, or [`TrackerError::InvalidValue`] for an unknown priority.
    pub fn validate(self) -> Result<NewTicket, TrackerError> {
        let mut missing = Vec::new();
        let client_name = required("client_name", self.client_name, &mut missing);
        let title = required("title", self.title, &mut missing);
        let priority = required("priority", self.priority, &mut missing);

        let (Some(client_name), Some(title), Some(priority)) = (client_name, title, priority)
        else {
            return Err(TrackerError::MissingField(missing));
        };

        Ok(NewTicket {
            client_name,
            title,
            priority: priority.parse()?,
        })
    }
}

/// Raw update request. All four fields are required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTicketInput {
    /// Client name.
    #[serde(default)]
    pub client_name: Option<String>,
    /// Ticket title.
    #[serde(default)]
    pub title: Option<String>,
    /// One of `open`, `in_progress`, `closed`.
    #[serde(default)]
    pub status: Option<String>,
    /// One of `low`, `medium`, `high`, `critical`.
    #[serde(default)]
    pub priority: Option<String>,
}

/// An update request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketChanges {
    /// Trimmed client name.
    pub client_name: String,
    /// Trimmed title.
    pub title: String,
    /// Parsed status.
    pub status: TicketStatus,
    /// Parsed priority.
    pub priority: TicketPriority,
}

impl UpdateTicketInput {
    /// Checks required fields, then the status and priority values.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MissingField`] naming every absent or blank
    /// field, or [`TrackerError::InvalidValue`] for an unknown status or
    /// priority.
    pub fn validate(self) -> Result<TicketChanges, TrackerError> {
        let mut missing = Vec::new();
        let client_name = required("client_name", self.client_name, &mut missing);
        let title = required("title", self.title, &mut missing);
        let status = required("status", self.status, &mut missing);
        let priority = required("priority", self.priority, &mut missing);

        let (Some(client_name), Some(title), Some(status), Some(priority)) =
            (client_name, title, status, priority)
        else {
            return Err(TrackerError::MissingField(missing));
        };

        Ok(TicketChanges {
            client_name,
            title,
            status: status.parse()?,
            priority: priority.parse()?,
        })
    }
}

/// Trims `value`; records `field` as missing when absent or blank.
fn required(
    field: &'static str,
    value: Option<String>,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        _ => {
            missing.push(field);
            None
        }
    }
}
