use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::{matches::MatchSummary, score::ScoreUpdateResponse};

/// SSE event name of [`MatchUpdateEvent`].
pub const SCORE_UPDATE_EVENT: &str = "score_update";
/// SSE event name of [`MatchCreatedEvent`].
pub const MATCH_CREATED_EVENT: &str = "match_created";
/// SSE event name of [`SystemStatus`].
pub const SYSTEM_STATUS_EVENT: &str = "system_status";
/// SSE event name of [`Handshake`].
pub const HANDSHAKE_EVENT: &str = "handshake";

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE and WebSocket channels.
pub struct ServerEvent {
    /// SSE event name.
    pub event: Option<String>,
    /// JSON encoded payload.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Initial metadata sent to a client when it connects.
pub struct Handshake {
    /// Identifier of the stream (`matches` or `match`).
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether the backend is running without a storage backend connection.
    pub degraded: bool,
    /// Match followed by the stream, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    /// Current degraded flag.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Broadcast after every accepted score update, on both the global and the match topic.
pub struct MatchUpdateEvent {
    /// Updated match.
    pub match_id: Uuid,
    /// Action that produced the update (`ball_update`, `undo_last_ball`, ...).
    pub action: String,
    /// Same envelope the scorer received.
    #[serde(flatten)]
    pub update: ScoreUpdateResponse,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast on the global topic when a match is scheduled.
pub struct MatchCreatedEvent {
    /// Listing entry of the new match.
    #[serde(rename = "match")]
    pub game: MatchSummary,
}
