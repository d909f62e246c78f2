use tracing::info;
use uuid::Uuid;

use crate::{
    dao::{
        match_store::MatchStore,
        models::{MatchEntity, MatchListItemEntity},
    },
    dto::{
        matches::{CreateMatchRequest, MatchSummary},
        score::{MatchView, ScoreboardResponse},
    },
    error::ServiceError,
    services::{sse_events::broadcast_match_created, team_service::load_team},
    state::{
        SharedState,
        matches::{Match, Roster},
    },
};

/// Schedule a match between two registered teams.
pub async fn create_match(
    state: &SharedState,
    request: CreateMatchRequest,
) -> Result<MatchView, ServiceError> {
    let store = state.require_match_store().await?;
    let home = load_team(store.as_ref(), request.home_team).await?;
    let away = load_team(store.as_ref(), request.away_team).await?;

    let game = Match::new(&home, &away, request.batting_first(), request.overs_limit);
    let view = MatchView::from(&game);
    let entity = MatchEntity::from(game);
    let summary = MatchSummary::from(MatchListItemEntity::from(&entity));
    store.insert_match(entity).await?;

    info!(
        match_id = %view.id,
        home = %home.name,
        away = %away.name,
        overs_limit = view.overs_limit,
        "match scheduled"
    );
    broadcast_match_created(state, summary);
    Ok(view)
}

/// Fetch the full match document.
pub async fn get_match(state: &SharedState, id: Uuid) -> Result<MatchView, ServiceError> {
    let store = state.require_match_store().await?;
    let game = load_match(store.as_ref(), id).await?;
    Ok(MatchView::from(&game))
}

/// List every match, newest first.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.require_match_store().await?;
    let items = store.list_matches().await?;
    Ok(items.into_iter().map(MatchSummary::from).collect())
}

/// Scorecard of every innings with player names resolved.
pub async fn scoreboard(state: &SharedState, id: Uuid) -> Result<ScoreboardResponse, ServiceError> {
    let store = state.require_match_store().await?;
    let game = load_match(store.as_ref(), id).await?;
    let roster = load_roster(store.as_ref(), &game).await?;
    Ok(ScoreboardResponse::new(&game, &roster))
}

pub(crate) async fn load_match(store: &dyn MatchStore, id: Uuid) -> Result<Match, ServiceError> {
    store
        .find_match(id)
        .await?
        .map(Match::from)
        .ok_or_else(|| ServiceError::NotFound(format!("match `{id}` not found")))
}

/// Both squads of `game`.
pub(crate) async fn load_roster(store: &dyn MatchStore, game: &Match) -> Result<Roster, ServiceError> {
    let home = load_team(store, game.home_team).await?;
    let away = load_team(store, game.away_team).await?;
    Ok(Roster::new(vec![home, away]))
}
