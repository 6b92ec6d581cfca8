//! Statistics and chart DTOs.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::TicketResponse;
use crate::domain::aggregator::{self, PRIORITY_AXIS, TicketBreakdown};
use crate::service::TicketStats;

/// Response body for `GET /tickets/stats`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// All tickets.
    pub total_tickets: u64,
    /// Tickets not closed.
    pub open_tickets: u64,
}

impl From<TicketStats> for StatsResponse {
    fn from(stats: TicketStats) -> Self {
        Self {
            total_tickets: stats.total_tickets,
            open_tickets: stats.open_tickets,
        }
    }
}

/// Per-priority series along the fixed chart axis.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChartSeries {
    /// Axis labels: `low`, `medium`, `high`, `critical`.
    pub axis: Vec<String>,
    /// All tickets per axis priority.
    pub priority: Vec<u64>,
    /// Overdue tickets per axis priority.
    pub overdue: Vec<u64>,
    /// Recently updated tickets per axis priority.
    pub recent: Vec<u64>,
    /// Active count, then closed counts per axis priority.
    pub closed_vs_open: Vec<u64>,
}

/// Response body for `GET /tickets/breakdown`.
///
/// The `*_counts` maps hold every priority string seen, including values
/// outside the axis; `charts` holds the axis projection only.
#[derive(Debug, Serialize, ToSchema)]
pub struct BreakdownResponse {
    /// All tickets by priority.
    pub priority_counts: BTreeMap<String, u64>,
    /// Overdue tickets by priority.
    pub overdue_counts: BTreeMap<String, u64>,
    /// Recently updated tickets by priority.
    pub recent_counts: BTreeMap<String, u64>,
    /// Closed tickets by priority.
    pub closed_priority_counts: BTreeMap<String, u64>,
    /// Tickets not closed.
    pub active_tickets: Vec<TicketResponse>,
    /// Closed tickets.
    pub closed_tickets: Vec<TicketResponse>,
    /// Fixed-axis projections.
    pub charts: ChartSeries,
}

impl From<TicketBreakdown> for BreakdownResponse {
    fn from(breakdown: TicketBreakdown) -> Self {
        let charts = ChartSeries {
            axis: PRIORITY_AXIS.iter().map(ToString::to_string).collect(),
            priority: aggregator::project(&breakdown.priority_counts).to_vec(),
            overdue: aggregator::project(&breakdown.overdue_counts).to_vec(),
            recent: aggregator::project(&breakdown.recent_counts).to_vec(),
            closed_vs_open: breakdown.closed_vs_open().to_vec(),
        };
        Self {
            priority_counts: breakdown.priority_counts,
            overdue_counts: breakdown.overdue_counts,
            recent_counts: breakdown.recent_counts,
            closed_priority_counts: breakdown.closed_priority_counts,
            active_tickets: breakdown.active_tickets.into_iter().map(Into::into).collect(),
            closed_tickets: breakdown.closed_tickets.into_iter().map(Into::into).collect(),
            charts,
        }
    }
}
