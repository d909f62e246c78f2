use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::{
    dao::models::{MatchEntity, MatchListItemEntity, PlayerEntity, TeamEntity},
    state::{
        innings::MatchPhase,
        matches::{Crease, MatchStatus, PlayerStatus},
        scoring::{PlayerStatLedger, ScoreState},
    },
};

/// Match as stored in the `matches` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMatchDocument {
    #[serde(rename = "_id")]
    id: String,
    home_team: Uuid,
    away_team: Uuid,
    batting_first: Uuid,
    overs_limit: u32,
    status: MatchStatus,
    phase: MatchPhase,
    current_innings: u8,
    target: Option<u32>,
    crease: Crease,
    scores: Vec<ScoreState>,
    ledgers: Vec<PlayerStatLedger>,
    player_statuses: Vec<(Uuid, PlayerStatus)>,
    #[serde(default)]
    commentary: Vec<String>,
    result: Option<String>,
    created_at: DateTime,
    updated_at: DateTime,
    version: i64,
}

impl From<MatchEntity> for MongoMatchDocument {
    fn from(value: MatchEntity) -> Self {
        Self {
            id: value.id.to_string(),
            home_team: value.home_team,
            away_team: value.away_team,
            batting_first: value.batting_first,
            overs_limit: value.overs_limit,
            status: value.status,
            phase: value.phase,
            current_innings: value.current_innings,
            target: value.target,
            crease: value.crease,
            scores: value.scores,
            ledgers: value.ledgers,
            player_statuses: value.player_statuses.into_iter().collect(),
            commentary: value.commentary,
            result: value.result,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
            version: version_to_bson(value.version),
        }
    }
}

impl TryFrom<MongoMatchDocument> for MatchEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoMatchDocument) -> Result<Self, Self::Error> {
        let id = parse_id(&value.id)?;
        Ok(Self {
            id,
            home_team: value.home_team,
            away_team: value.away_team,
            batting_first: value.batting_first,
            overs_limit: value.overs_limit,
            status: value.status,
            phase: value.phase,
            current_innings: value.current_innings,
            target: value.target,
            crease: value.crease,
            scores: value.scores,
            ledgers: value.ledgers,
            player_statuses: value.player_statuses.into_iter().collect(),
            commentary: value.commentary,
            result: value.result,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
            version: u64::try_from(value.version).map_err(|_| MongoDaoError::Decode {
                id: value.id.clone(),
                message: format!("negative version {}", value.version),
            })?,
        })
    }
}

impl TryFrom<MongoMatchDocument> for MatchListItemEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoMatchDocument) -> Result<Self, Self::Error> {
        let entity = MatchEntity::try_from(value)?;
        Ok(MatchListItemEntity::from(&entity))
    }
}

/// Team as stored in the `teams` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTeamDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    players: Vec<PlayerEntity>,
    created_at: DateTime,
}

impl From<TeamEntity> for MongoTeamDocument {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            players: value.players,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl TryFrom<MongoTeamDocument> for TeamEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoTeamDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&value.id)?,
            name: value.name,
            players: value.players,
            created_at: value.created_at.to_system_time(),
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, MongoDaoError> {
    Uuid::parse_str(raw).map_err(|err| MongoDaoError::Decode {
        id: raw.to_owned(),
        message: err.to_string(),
    })
}

/// BSON has no unsigned 64-bit integer.
pub fn version_to_bson(version: u64) -> i64 {
    i64::try_from(version).unwrap_or(i64::MAX)
}

/// Filter on `_id`.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}

/// Filter on `_id` that only matches the expected version.
pub fn versioned_doc_id(id: Uuid, version: u64) -> Document {
    doc! {"_id": id.to_string(), "version": version_to_bson(version)}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::matches::{Match, Team};

    #[test]
    fn match_document_round_trips_through_the_entity() {
        let home = Team::new("Home".into(), vec!["A".into(), "B".into()]);
        let away = Team::new("Away".into(), vec!["C".into(), "D".into()]);
        let mut game = Match::new(&home, &away, away.id, 10);
        game.version = 7;
        let entity: MatchEntity = game.into();

        let document = MongoMatchDocument::from(entity.clone());
        assert_eq!(document.id, entity.id.to_string());
        assert_eq!(document.player_statuses.len(), 4);

        let restored = MatchEntity::try_from(document).unwrap();
        assert_eq!(restored.id, entity.id);
        assert_eq!(restored.version, 7);
        assert_eq!(restored.player_statuses, entity.player_statuses);
    }

    #[test]
    fn malformed_ids_are_reported() {
        let team = MongoTeamDocument {
            id: "not-a-uuid".into(),
            name: "Broken".into(),
            players: Vec::new(),
            created_at: DateTime::now(),
        };
        assert!(matches!(
            TeamEntity::try_from(team),
            Err(MongoDaoError::Decode { .. })
        ));
    }
}
