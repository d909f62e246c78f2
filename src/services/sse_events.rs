use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        matches::MatchSummary,
        sse::{
            MATCH_CREATED_EVENT, MatchCreatedEvent, MatchUpdateEvent, SCORE_UPDATE_EVENT,
            SYSTEM_STATUS_EVENT, ServerEvent, SystemStatus,
        },
    },
    state::{Broadcaster, SharedState, Topic},
};

/// Publish an accepted score update to listing pages and to the match followers.
pub fn broadcast_match_update(broadcaster: &dyn Broadcaster, update: &MatchUpdateEvent) {
    let Some(event) = encode(SCORE_UPDATE_EVENT, update) else {
        return;
    };
    broadcaster.publish(Topic::Global, event.clone());
    broadcaster.publish(Topic::Match(update.match_id), event);
}

/// Announce a newly scheduled match on the global topic.
pub fn broadcast_match_created(state: &SharedState, game: MatchSummary) {
    if let Some(event) = encode(MATCH_CREATED_EVENT, &MatchCreatedEvent { game }) {
        state.broadcaster().publish(Topic::Global, event);
    }
}

/// Tell global subscribers the backend entered or left degraded mode.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    if let Some(event) = encode(SYSTEM_STATUS_EVENT, &SystemStatus { degraded }) {
        state.broadcaster().publish(Topic::Global, event);
    }
}

fn encode(event: &str, payload: &impl Serialize) -> Option<ServerEvent> {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(event, error = %err, "failed to serialize SSE payload");
            None
        }
    }
}
