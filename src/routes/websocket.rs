use axum::{
    Router,
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    services::{sse_service, websocket_service},
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/ws/matches/{id}",
    tag = "websocket",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 101, description = "Switching protocols to WebSocket"),
        (status = 404, description = "Unknown match")
    )
)]
/// Upgrade the HTTP connection into a read-only feed of one match.
pub async fn ws_handler(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let updates = sse_service::subscribe_match(&state, id).await?;
    Ok(ws.on_upgrade(move |socket| websocket_service::handle_socket(state, socket, id, updates)))
}

/// Configure the WebSocket endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/ws/matches/{id}", get(ws_handler))
}
