use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::{
        matches::{CreateMatchRequest, MatchSummary},
        score::{MatchView, ScoreUpdateRequest, ScoreUpdateResponse, ScoreboardResponse},
    },
    error::AppError,
    services::{
        match_service,
        score_service::{self, ScoreAction},
    },
    state::SharedState,
};

/// Match scheduling, reads and the scorer endpoint.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", get(list_matches).post(create_match))
        .route("/matches/{id}", get(get_match))
        .route("/matches/{id}/scoreboard", get(get_scoreboard))
        .route("/matches/{id}/score", put(update_score))
}

/// Schedule a match between two registered teams.
#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match scheduled", body = MatchView),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn create_match(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateMatchRequest>>,
) -> Result<(StatusCode, Json<MatchView>), AppError> {
    let game = match_service::create_match(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// List every match, newest first.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    responses((status = 200, description = "Known matches", body = [MatchSummary]))
)]
pub async fn list_matches(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    Ok(Json(match_service::list_matches(&state).await?))
}

/// Fetch the full match document.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match document", body = MatchView),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchView>, AppError> {
    Ok(Json(match_service::get_match(&state, id).await?))
}

/// Scorecard of every innings with names resolved.
#[utoipa::path(
    get,
    path = "/matches/{id}/scoreboard",
    tag = "matches",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Scorecard", body = ScoreboardResponse),
        (status = 404, description = "Unknown match")
    )
)]
pub async fn get_scoreboard(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScoreboardResponse>, AppError> {
    Ok(Json(match_service::scoreboard(&state, id).await?))
}

/// Apply exactly one scorer action to a match.
#[utoipa::path(
    put,
    path = "/matches/{id}/score",
    tag = "score",
    params(("id" = Uuid, Path, description = "Identifier of the match")),
    request_body = ScoreUpdateRequest,
    responses(
        (status = 200, description = "Update applied", body = ScoreUpdateResponse),
        (status = 400, description = "Invalid action or players"),
        (status = 404, description = "Unknown match or player"),
        (status = 409, description = "Action not allowed in the current state"),
        (status = 503, description = "Storage unavailable or mutation timed out")
    )
)]
pub async fn update_score(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<ScoreUpdateRequest>>,
) -> Result<Json<ScoreUpdateResponse>, AppError> {
    let action = ScoreAction::try_from(payload)?;
    Ok(Json(score_service::update_score(&state, id, action).await?))
}
