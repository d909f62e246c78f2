use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::sse::{HANDSHAKE_EVENT, Handshake, ServerEvent},
    error::ServiceError,
    services::match_service::load_match,
    state::{SharedState, Topic},
};

/// Identifies the SSE stream so connect and disconnect can be logged per topic.
#[derive(Clone, Copy, Debug)]
pub enum StreamKind {
    /// Every match update.
    Matches,
    /// Updates of one match.
    Match(Uuid),
}

impl StreamKind {
    fn topic(self) -> Topic {
        match self {
            StreamKind::Matches => Topic::Global,
            StreamKind::Match(id) => Topic::Match(id),
        }
    }
}

/// Subscribe to the global topic.
pub fn subscribe_matches(state: &SharedState) -> broadcast::Receiver<ServerEvent> {
    state.channels().subscribe(Topic::Global)
}

/// Subscribe to one match; the match must exist unless storage is down.
pub async fn subscribe_match(
    state: &SharedState,
    match_id: Uuid,
) -> Result<broadcast::Receiver<ServerEvent>, ServiceError> {
    if let Some(store) = state.match_store().await {
        load_match(store.as_ref(), match_id).await?;
    }
    Ok(state.channels().subscribe(Topic::Match(match_id)))
}

/// First event sent on every stream.
pub async fn handshake(state: &SharedState, kind: StreamKind) -> Option<ServerEvent> {
    let (stream, message, match_id) = match kind {
        StreamKind::Matches => ("matches", "subscribed to all matches".to_string(), None),
        StreamKind::Match(id) => ("match", format!("subscribed to match {id}"), Some(id)),
    };
    let payload = Handshake {
        stream: stream.into(),
        message,
        degraded: state.is_degraded().await,
        match_id,
    };
    match ServerEvent::json(Some(HANDSHAKE_EVENT.to_string()), &payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, "failed to serialize SSE handshake");
            None
        }
    }
}

fn to_event(payload: ServerEvent) -> Event {
    let event = Event::default().data(payload.data);
    match payload.event {
        Some(name) => event.event(name),
        None => event,
    }
}

/// Convert a broadcast receiver into an SSE response, forwarding events until
/// the client disconnects.
pub fn to_sse_stream(
    mut receiver: broadcast::Receiver<ServerEvent>,
    kind: StreamKind,
    handshake: Option<ServerEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    info!(topic = ?kind.topic(), "SSE stream connected");
    tokio::spawn(async move {
        if let Some(payload) = handshake {
            if tx.send(Ok(to_event(payload))).await.is_err() {
                return;
            }
        }

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(payload) => {
                            if tx.send(Ok(to_event(payload))).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        // Lagging subscribers skip what they missed.
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(topic = ?kind.topic(), skipped, "SSE subscriber lagged");
                        }
                    }
                }
            }
        }

        info!(topic = ?kind.topic(), "SSE stream disconnected");
    });

    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
