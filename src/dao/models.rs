use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::time::SystemTime;
use uuid::Uuid;

use crate::state::{
    innings::MatchPhase,
    matches::{Crease, MatchStatus, PlayerStatus},
    scoring::{PlayerStatLedger, ScoreState},
};

/// Squad member stored inside a team document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Stable identifier for the player.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Team roster persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Squad members.
    pub players: Vec<PlayerEntity>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// Aggregate match entity persisted by the storage layer as one document.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Home side.
    pub home_team: Uuid,
    /// Away side.
    pub away_team: Uuid,
    /// Side batting first.
    pub batting_first: Uuid,
    /// Overs per innings.
    pub overs_limit: u32,
    /// Public status.
    pub status: MatchStatus,
    /// Innings phase.
    pub phase: MatchPhase,
    /// Innings in play.
    pub current_innings: u8,
    /// Chase target.
    pub target: Option<u32>,
    /// Players in action.
    pub crease: Crease,
    /// Per-innings totals.
    pub scores: Vec<ScoreState>,
    /// Per-innings player ledgers.
    pub ledgers: Vec<PlayerStatLedger>,
    /// Field status per player, stored as pairs so keys survive any backend.
    #[serde_as(as = "Vec<(_, _)>")]
    pub player_statuses: IndexMap<Uuid, PlayerStatus>,
    /// Match-level commentary.
    pub commentary: Vec<String>,
    /// Result line once completed.
    pub result: Option<String>,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last mutation timestamp.
    pub updated_at: SystemTime,
    /// Optimistic concurrency token.
    pub version: u64,
}

/// Listing projection of a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchListItemEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Home side.
    pub home_team: Uuid,
    /// Away side.
    pub away_team: Uuid,
    /// Overs per innings.
    pub overs_limit: u32,
    /// Public status.
    pub status: MatchStatus,
    /// Result line once completed.
    pub result: Option<String>,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last mutation timestamp.
    pub updated_at: SystemTime,
}

impl From<&MatchEntity> for MatchListItemEntity {
    fn from(entity: &MatchEntity) -> Self {
        Self {
            id: entity.id,
            home_team: entity.home_team,
            away_team: entity.away_team,
            overs_limit: entity.overs_limit,
            status: entity.status,
            result: entity.result.clone(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
