use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Health check payloads.
pub mod health;
/// Match scheduling and listing payloads.
pub mod matches;
/// Score update, match document and scorecard payloads.
pub mod score;
/// Server-sent event payloads.
pub mod sse;
/// Team roster payloads.
pub mod teams;
/// Validation helpers for DTOs.
pub mod validation;
/// WebSocket frames.
pub mod ws;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
