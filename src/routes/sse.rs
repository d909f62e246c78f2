use std::convert::Infallible;

use axum::{
    Router,
    extract::{Path, State},
    response::sse::{Event, Sse},
    routing::get,
};
use futures::Stream;
use uuid::Uuid;

use crate::{
    error::AppError,
    services::sse_service::{self, StreamKind},
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/sse/matches",
    tag = "sse",
    responses((status = 200, description = "Updates of every match", content_type = "text/event-stream", body = String))
)]
/// Stream every match update to listing pages.
pub async fn matches_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = sse_service::subscribe_matches(&state);
    let handshake = sse_service::handshake(&state, StreamKind::Matches).await;
    sse_service::to_sse_stream(receiver, StreamKind::Matches, handshake)
}

#[utoipa::path(
    get,
    path = "/sse/matches/{id}",
    tag = "sse",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Updates of one match", content_type = "text/event-stream", body = String),
        (status = 404, description = "Unknown match")
    )
)]
/// Stream the updates of a single match.
pub async fn match_stream(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let receiver = sse_service::subscribe_match(&state, id).await?;
    let handshake = sse_service::handshake(&state, StreamKind::Match(id)).await;
    Ok(sse_service::to_sse_stream(
        receiver,
        StreamKind::Match(id),
        handshake,
    ))
}

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/sse/matches", get(matches_stream))
        .route("/sse/matches/{id}", get(match_stream))
}
