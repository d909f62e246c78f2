use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{
    sync::{
        broadcast::{self, error::RecvError},
        mpsc,
    },
    task::JoinHandle,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::{sse::ServerEvent, ws::WsFrame},
    services::sse_service::{StreamKind, handshake},
    state::SharedState,
};

/// Push every update of `match_id` to a WebSocket follower until either side closes.
pub async fn handle_socket(
    state: SharedState,
    socket: WebSocket,
    match_id: Uuid,
    mut updates: broadcast::Receiver<ServerEvent>,
) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    info!(match_id = %match_id, "websocket follower connected");

    if let Some(event) = handshake(&state, StreamKind::Match(match_id)).await {
        if send_frame(&outbound_tx, &event).is_err() {
            finalize(writer_task, outbound_tx).await;
            return;
        }
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(event) => {
                    if send_frame(&outbound_tx, &event).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(match_id = %match_id, skipped, "websocket follower lagged");
                }
                Err(RecvError::Closed) => break,
            },
            inbound = receiver.next() => match inbound {
                Some(Ok(Message::Ping(payload))) => {
                    let _ = outbound_tx.send(Message::Pong(payload));
                }
                Some(Ok(Message::Close(frame))) => {
                    let _ = outbound_tx.send(Message::Close(frame));
                    break;
                }
                // Followers are read-only.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(match_id = %match_id, error = %err, "websocket error");
                    break;
                }
                None => break,
            },
        }
    }

    info!(match_id = %match_id, "websocket follower disconnected");
    finalize(writer_task, outbound_tx).await;
}

/// Serialize an event as a [`WsFrame`] and queue it on the writer.
///
/// Fails only when the writer is gone.
fn send_frame(tx: &mpsc::UnboundedSender<Message>, event: &ServerEvent) -> Result<(), ()> {
    let payload = match serde_json::to_string(&WsFrame::from(event)) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize websocket frame");
            return Ok(());
        }
    };
    tx.send(Message::Text(payload.into())).map_err(|_| ())
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
