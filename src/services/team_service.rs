use tracing::info;
use uuid::Uuid;

use crate::{
    dao::{match_store::MatchStore, models::TeamEntity},
    dto::teams::{CreateTeamRequest, TeamResponse},
    error::ServiceError,
    state::{SharedState, matches::Team},
};

/// Register a team and its squad.
pub async fn create_team(
    state: &SharedState,
    request: CreateTeamRequest,
) -> Result<TeamResponse, ServiceError> {
    let store = state.require_match_store().await?;
    let team = Team::from(request);
    store.save_team(TeamEntity::from(team.clone())).await?;
    info!(team_id = %team.id, players = team.players.len(), "team registered");
    Ok(TeamResponse::from(&team))
}

/// Fetch a team roster.
pub async fn get_team(state: &SharedState, id: Uuid) -> Result<TeamResponse, ServiceError> {
    let store = state.require_match_store().await?;
    let team = load_team(store.as_ref(), id).await?;
    Ok(TeamResponse::from(&team))
}

pub(crate) async fn load_team(store: &dyn MatchStore, id: Uuid) -> Result<Team, ServiceError> {
    store
        .find_team(id)
        .await?
        .map(Team::from)
        .ok_or_else(|| ServiceError::NotFound(format!("team `{id}` not found")))
}
