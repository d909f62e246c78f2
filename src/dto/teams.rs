use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        format_system_time,
        validation::{validate_name, validate_squad},
    },
    state::matches::{Player, Team},
};

/// Payload used to register a team and its squad.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    /// Team name.
    pub name: String,
    /// Player names; ids are assigned by the backend.
    pub players: Vec<String>,
}

impl Validate for CreateTeamRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_name(&self.name) {
            errors.add("name", e);
        }
        if let Err(e) = validate_squad(&self.players) {
            errors.add("players", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<CreateTeamRequest> for Team {
    fn from(request: CreateTeamRequest) -> Self {
        Team::new(
            request.name.trim().to_string(),
            request
                .players
                .into_iter()
                .map(|name| name.trim().to_string())
                .collect(),
        )
    }
}

/// Squad member as exposed to clients.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PlayerDto {
    /// Player id used in score updates.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl From<&Player> for PlayerDto {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
        }
    }
}

/// Team roster returned by the team routes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    /// Team id.
    pub id: Uuid,
    /// Team name.
    pub name: String,
    /// Squad, in registration order.
    pub players: Vec<PlayerDto>,
    /// RFC 3339 creation time.
    pub created_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            players: team.players.iter().map(PlayerDto::from).collect(),
            created_at: format_system_time(team.created_at),
        }
    }
}
