//! CSV bulk import.
//!
//! Expected header: `id,client_name,title,status,priority,created_at,updated_at`.
//! Values are coerced to their column types and otherwise taken verbatim:
//! statuses and priorities are not checked and ids are not renumbered.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::Ticket;
use crate::error::TrackerError;

#[derive(Debug, Deserialize)]
struct CsvTicketRow {
    id: i64,
    client_name: String,
    title: String,
    status: String,
    priority: String,
    created_at: String,
    updated_at: String,
}

/// Parses a CSV document into tickets.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidImport`] naming the first row that fails
/// to parse.
pub fn parse_csv(data: &[u8]) -> Result<Vec<Ticket>, TrackerError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut tickets = Vec::new();
    for (index, result) in reader.deserialize::<CsvTicketRow>().enumerate() {
        // Row 1 is the header.
        let row_num = index + 2;
        let row = result.map_err(|e| TrackerError::InvalidImport(format!("row {row_num}: {e}")))?;
        tickets.push(Ticket {
            id: row.id,
            client_name: row.client_name,
            title: row.title,
            status: row.status,
            priority: row.priority,
            created_at: parse_timestamp(&row.created_at)
                .ok_or_else(|| bad_timestamp(row_num, "created_at", &row.created_at))?,
            updated_at: parse_timestamp(&row.updated_at)
                .ok_or_else(|| bad_timestamp(row_num, "updated_at", &row.updated_at))?,
        });
    }

    Ok(tickets)
}

fn bad_timestamp(row_num: usize, column: &str, value: &str) -> TrackerError {
    TrackerError::InvalidImport(format!("row {row_num}: invalid {column} {value:?}"))
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`; naive forms are UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
