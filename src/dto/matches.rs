use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::MatchListItemEntity,
    dto::{
        format_system_time,
        validation::{error, validate_overs_limit},
    },
    state::matches::MatchStatus,
};

/// Payload used to schedule a match between two registered teams.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    /// Home side.
    pub home_team: Uuid,
    /// Away side.
    pub away_team: Uuid,
    /// Side batting first; defaults to the home side.
    #[serde(default)]
    pub batting_first: Option<Uuid>,
    /// Overs per innings.
    pub overs_limit: u32,
}

impl CreateMatchRequest {
    /// Side batting first once defaults are applied.
    pub fn batting_first(&self) -> Uuid {
        self.batting_first.unwrap_or(self.home_team)
    }
}

impl Validate for CreateMatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.home_team == self.away_team {
            errors.add(
                "awayTeam",
                error("same_team", "a team cannot play itself".into()),
            );
        }

        if let Some(side) = self.batting_first {
            if side != self.home_team && side != self.away_team {
                errors.add(
                    "battingFirst",
                    error(
                        "batting_first_side",
                        "battingFirst must be the home or the away team".into(),
                    ),
                );
            }
        }

        if let Err(e) = validate_overs_limit(self.overs_limit) {
            errors.add("oversLimit", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Listing entry returned by `GET /matches`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// Match id.
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
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last mutation.
    pub updated_at: String,
}

impl From<MatchListItemEntity> for MatchSummary {
    fn from(item: MatchListItemEntity) -> Self {
        Self {
            id: item.id,
            home_team: item.home_team,
            away_team: item.away_team,
            overs_limit: item.overs_limit,
            status: item.status,
            result: item.result,
            created_at: format_system_time(item.created_at),
            updated_at: format_system_time(item.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(batting_first: Option<Uuid>, overs_limit: u32) -> CreateMatchRequest {
        CreateMatchRequest {
            home_team: Uuid::from_u128(1),
            away_team: Uuid::from_u128(2),
            batting_first,
            overs_limit,
        }
    }

    #[test]
    fn batting_first_defaults_to_home() {
        let req = request(None, 20);
        assert!(req.validate().is_ok());
        assert_eq!(req.batting_first(), Uuid::from_u128(1));
    }

    #[test]
    fn batting_first_must_be_one_of_the_sides() {
        assert!(request(Some(Uuid::from_u128(2)), 20).validate().is_ok());
        assert!(request(Some(Uuid::from_u128(3)), 20).validate().is_err());
    }

    #[test]
    fn overs_limit_and_distinct_teams_are_checked() {
        assert!(request(None, 0).validate().is_err());
        let mut same = request(None, 20);
        same.away_team = same.home_team;
        assert!(same.validate().is_err());
    }

    #[test]
    fn summary_is_camel_cased() {
        let item = MatchListItemEntity {
            id: Uuid::from_u128(9),
            home_team: Uuid::from_u128(1),
            away_team: Uuid::from_u128(2),
            overs_limit: 20,
            status: MatchStatus::Upcoming,
            result: None,
            created_at: std::time::SystemTime::UNIX_EPOCH,
            updated_at: std::time::SystemTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(MatchSummary::from(item)).unwrap();
        assert_eq!(json["oversLimit"], 20);
        assert_eq!(json["status"], "upcoming");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }
}
