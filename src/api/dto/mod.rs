//! Data Transfer Objects for REST request/response serialization.
//!
//! Timestamps are serialized as RFC 3339 strings in UTC.

pub mod stats_dto;
pub mod ticket_dto;

pub use stats_dto::*;
pub use ticket_dto::*;
