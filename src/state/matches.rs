use std::time::SystemTime;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, PlayerEntity, TeamEntity},
    state::{
        innings::MatchPhase,
        scoring::{
            BALLS_PER_OVER, Delivery, DeliveryOutcome, DismissalType, ExtraType, PlayerStatLedger,
            ScoreState, ScoringError, ScoringPolicy, apply_delivery, undo_last_delivery,
        },
    },
};

/// Externally visible lifecycle of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Scheduled, no ball bowled yet.
    #[default]
    Upcoming,
    /// In play or at the innings break.
    Live,
    /// Finished and archived.
    Completed,
}

/// What a player is currently doing on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Batting side, not yet in.
    YetToBat,
    /// At the crease.
    Batting,
    /// Dismissed.
    Out,
    /// Bowling the current over.
    Bowling,
    /// Fielding side, not bowling.
    Fielding,
}

/// Players currently in action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Crease {
    /// Batter on strike.
    pub striker: Option<Uuid>,
    /// Batter at the other end.
    pub non_striker: Option<Uuid>,
    /// Bowler of the current over.
    pub bowler: Option<Uuid>,
}

impl Crease {
    /// Empty crease, used between innings.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Roster player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Team roster as resolved from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Squad members.
    pub players: Vec<Player>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

impl Team {
    /// Build a new team, allocating identifiers for the team and its players.
    pub fn new(name: String, player_names: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            players: player_names
                .into_iter()
                .map(|name| Player {
                    id: Uuid::new_v4(),
                    name,
                })
                .collect(),
            created_at: SystemTime::now(),
        }
    }

    /// Whether the player is part of this squad.
    pub fn contains(&self, player_id: Uuid) -> bool {
        self.players.iter().any(|player| player.id == player_id)
    }
}

/// Both squads of a fixture, used for name resolution and side checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    /// Roster made of the given teams.
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Team by identifier.
    pub fn team(&self, team_id: Uuid) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    /// Team the player belongs to.
    pub fn team_of(&self, player_id: Uuid) -> Option<Uuid> {
        self.teams
            .iter()
            .find(|team| team.contains(player_id))
            .map(|team| team.id)
    }

    /// Display name of a player, falling back to a placeholder for unknown ids.
    pub fn player_name(&self, player_id: Uuid) -> &str {
        self.teams
            .iter()
            .flat_map(|team| team.players.iter())
            .find(|player| player.id == player_id)
            .map(|player| player.name.as_str())
            .unwrap_or("Unknown player")
    }

    /// Display name of a team.
    pub fn team_name(&self, team_id: Uuid) -> &str {
        self.team(team_id)
            .map(|team| team.name.as_str())
            .unwrap_or("Unknown team")
    }

    /// Ensure the player exists and plays for `team_id`.
    pub fn check_side(
        &self,
        player_id: Uuid,
        team_id: Uuid,
        role: &'static str,
    ) -> Result<(), ScoringError> {
        match self.team_of(player_id) {
            None => Err(ScoringError::UnknownPlayer(player_id)),
            Some(team) if team != team_id => Err(ScoringError::WrongSide {
                player: player_id,
                role,
            }),
            Some(_) => Ok(()),
        }
    }
}

/// One ball as described by a score-update request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BallUpdate {
    /// Runs off the bat or taken as extras.
    pub runs: u32,
    /// Extra attached to the ball.
    pub extra_type: ExtraType,
    /// Whether a wicket fell.
    pub wicket: bool,
    /// Dismissal kind for a wicket.
    pub dismissal_type: Option<DismissalType>,
    /// Striker; defaults to the current striker.
    pub striker: Option<Uuid>,
    /// Non-striker; defaults to the current non-striker.
    pub non_striker: Option<Uuid>,
    /// Bowler; defaults to the current bowler.
    pub bowler: Option<Uuid>,
    /// Replacement batter after a wicket.
    pub new_batsman: Option<Uuid>,
    /// Innings the client believes is in play.
    pub innings: Option<u8>,
}

/// Aggregate root for one fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Primary key.
    pub id: Uuid,
    /// Home side.
    pub home_team: Uuid,
    /// Away side.
    pub away_team: Uuid,
    /// Side batting in the first innings.
    pub batting_first: Uuid,
    /// Overs per innings.
    pub overs_limit: u32,
    /// Public status.
    pub status: MatchStatus,
    /// Innings phase.
    pub phase: MatchPhase,
    /// Innings in play (1 or 2).
    pub current_innings: u8,
    /// Runs the chasing side needs to win.
    pub target: Option<u32>,
    /// Players currently in action.
    pub crease: Crease,
    /// Per-innings score totals.
    pub scores: Vec<ScoreState>,
    /// Per-innings player ledgers.
    pub ledgers: Vec<PlayerStatLedger>,
    /// Field status per player.
    pub player_statuses: IndexMap<Uuid, PlayerStatus>,
    /// Match-level commentary (innings transitions, result).
    pub commentary: Vec<String>,
    /// Result line once completed.
    pub result: Option<String>,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last mutation timestamp.
    pub updated_at: SystemTime,
    /// Incremented on every saved mutation.
    pub version: u64,
}

impl Match {
    /// New fixture between two teams with no score yet.
    pub fn new(home_team: &Team, away_team: &Team, batting_first: Uuid, overs_limit: u32) -> Self {
        let timestamp = SystemTime::now();
        let mut player_statuses = IndexMap::new();
        for team in [home_team, away_team] {
            let status = if team.id == batting_first {
                PlayerStatus::YetToBat
            } else {
                PlayerStatus::Fielding
            };
            for player in &team.players {
                player_statuses.insert(player.id, status);
            }
        }

        Self {
            id: Uuid::new_v4(),
            home_team: home_team.id,
            away_team: away_team.id,
            batting_first,
            overs_limit,
            status: MatchStatus::Upcoming,
            phase: MatchPhase::PreMatch,
            current_innings: 1,
            target: None,
            crease: Crease::default(),
            scores: Vec::new(),
            ledgers: Vec::new(),
            player_statuses,
            commentary: Vec::new(),
            result: None,
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        }
    }

    /// Side batting in the given innings.
    pub fn batting_team(&self, innings: u8) -> Uuid {
        match (innings, self.batting_first == self.home_team) {
            (1, true) | (2, false) => self.home_team,
            _ => self.away_team,
        }
    }

    /// Side fielding in the given innings.
    pub fn fielding_team(&self, innings: u8) -> Uuid {
        if self.batting_team(innings) == self.home_team {
            self.away_team
        } else {
            self.home_team
        }
    }

    /// Score for an innings, if it has started.
    pub fn score(&self, innings: u8) -> Option<&ScoreState> {
        self.scores.iter().find(|score| score.innings == innings)
    }

    /// Ledger for an innings, if it has started.
    pub fn ledger(&self, innings: u8) -> Option<&PlayerStatLedger> {
        self.ledgers.iter().find(|ledger| ledger.innings == innings)
    }

    /// Score of the innings in play.
    pub fn current_score(&self) -> Option<&ScoreState> {
        self.score(self.current_innings)
    }

    /// Ledger of the innings in play.
    pub fn current_ledger(&self) -> Option<&PlayerStatLedger> {
        self.ledger(self.current_innings)
    }

    /// Mutable score and ledger of an innings.
    pub(crate) fn innings_mut(
        &mut self,
        innings: u8,
    ) -> Option<(&mut ScoreState, &mut PlayerStatLedger)> {
        let score = self.scores.iter_mut().find(|score| score.innings == innings)?;
        let ledger = self
            .ledgers
            .iter_mut()
            .find(|ledger| ledger.innings == innings)?;
        Some((score, ledger))
    }

    /// Create the score and ledger of an innings unless they already exist.
    pub(crate) fn ensure_innings(&mut self, innings: u8) -> Result<(), ScoringError> {
        if !(1..=2).contains(&innings) {
            return Err(ScoringError::InvalidInnings(innings));
        }
        if self.score(innings).is_none() {
            self.scores.push(ScoreState::new(innings));
        }
        if self.ledger(innings).is_none() {
            self.ledgers.push(PlayerStatLedger::new(innings));
        }
        Ok(())
    }

    /// Replace the score and ledger of an innings with empty ones.
    pub(crate) fn reset_innings(&mut self, innings: u8) -> Result<(), ScoringError> {
        self.scores.retain(|score| score.innings != innings);
        self.ledgers.retain(|ledger| ledger.innings != innings);
        self.ensure_innings(innings)
    }

    /// Mark a mutation as persisted-to-be.
    pub fn bump_version(&mut self) {
        self.version += 1;
        self.updated_at = SystemTime::now();
    }

    pub(crate) fn set_status(&mut self, player_id: Uuid, status: PlayerStatus) {
        self.player_statuses.insert(player_id, status);
    }

    /// Record one ball for the innings in play.
    ///
    /// A ball arriving before the match has been started starts the first innings.
    pub fn record_ball(
        &mut self,
        ball: BallUpdate,
        roster: &Roster,
    ) -> Result<DeliveryOutcome, ScoringError> {
        let (starting, innings) = match self.phase {
            MatchPhase::PreMatch => (true, 1),
            MatchPhase::FirstInnings | MatchPhase::SecondInnings => (false, self.current_innings),
            phase @ (MatchPhase::InningsBreak | MatchPhase::Completed) => {
                return Err(ScoringError::NotAcceptingDeliveries(phase));
            }
        };

        if let Some(requested) = ball.innings.filter(|requested| *requested != innings) {
            return Err(ScoringError::InningsMismatch {
                expected: innings,
                got: requested,
            });
        }

        let striker = ball
            .striker
            .or(self.crease.striker)
            .ok_or(ScoringError::MissingPlayer("striker"))?;
        let bowler = ball
            .bowler
            .or(self.crease.bowler)
            .ok_or(ScoringError::MissingPlayer("bowler"))?;
        let non_striker = ball.non_striker.or(self.crease.non_striker);
        self.validate_ball(innings, &ball, striker, non_striker, bowler, roster)?;

        if starting {
            self.start_match()?;
        }
        self.ensure_innings(innings)?;
        self.seat_bowler(bowler);
        self.crease.striker = Some(striker);
        self.crease.non_striker = non_striker;
        self.set_status(striker, PlayerStatus::Batting);
        if let Some(partner) = non_striker {
            self.set_status(partner, PlayerStatus::Batting);
        }

        let (score, ledger) = self
            .innings_mut(innings)
            .ok_or(ScoringError::InvalidInnings(innings))?;
        let commentary = describe_ball(score, &ball, striker, bowler, roster);
        let mut delivery = Delivery::new(striker, bowler, ball.runs, ball.extra_type)
            .with_non_striker(non_striker)
            .with_commentary(commentary);
        if ball.wicket {
            delivery = delivery.with_wicket(ball.dismissal_type, ball.new_batsman);
        }
        let outcome = apply_delivery(score, ledger, delivery);

        if ball.wicket {
            self.set_status(striker, PlayerStatus::Out);
            self.crease.striker = ball.new_batsman;
            if let Some(new_batsman) = ball.new_batsman {
                self.set_status(new_batsman, PlayerStatus::Batting);
            }
        }

        Ok(outcome)
    }

    fn validate_ball(
        &self,
        innings: u8,
        ball: &BallUpdate,
        striker: Uuid,
        non_striker: Option<Uuid>,
        bowler: Uuid,
        roster: &Roster,
    ) -> Result<(), ScoringError> {
        let batting = self.batting_team(innings);
        let fielding = self.fielding_team(innings);

        roster.check_side(striker, batting, "striker")?;
        if let Some(partner) = non_striker {
            roster.check_side(partner, batting, "non-striker")?;
            if partner == striker {
                return Err(ScoringError::InvalidDelivery(
                    "striker and non-striker must differ".into(),
                ));
            }
        }
        roster.check_side(bowler, fielding, "bowler")?;

        if !ball.wicket && (ball.dismissal_type.is_some() || ball.new_batsman.is_some()) {
            return Err(ScoringError::InvalidDelivery(
                "dismissal details require a wicket".into(),
            ));
        }

        if let Some(new_batsman) = ball.new_batsman {
            roster.check_side(new_batsman, batting, "new batsman")?;
            if Some(new_batsman) == non_striker || new_batsman == striker {
                return Err(ScoringError::InvalidDelivery(
                    "new batsman is already at the crease".into(),
                ));
            }
            let already_out = self
                .ledger(innings)
                .and_then(|ledger| ledger.get(new_batsman))
                .is_some_and(|entry| entry.is_out);
            if already_out {
                return Err(ScoringError::InvalidDelivery(
                    "new batsman has already been dismissed".into(),
                ));
            }
        }

        if self
            .ledger(innings)
            .and_then(|ledger| ledger.get(striker))
            .is_some_and(|entry| entry.is_out)
        {
            return Err(ScoringError::InvalidDelivery(
                "striker has already been dismissed".into(),
            ));
        }

        Ok(())
    }

    fn seat_bowler(&mut self, bowler: Uuid) {
        if let Some(previous) = self.crease.bowler.filter(|previous| *previous != bowler) {
            self.set_status(previous, PlayerStatus::Fielding);
        }
        self.crease.bowler = Some(bowler);
        self.set_status(bowler, PlayerStatus::Bowling);
    }

    /// Reverse the last delivery of an innings (innings 1 unless specified).
    ///
    /// When the innings is the one in play, the crease is restored to the
    /// actors of the undone delivery. Once the chase has started the first
    /// innings is closed for good.
    pub fn undo_ball(&mut self, innings: Option<u8>) -> Result<Delivery, ScoringError> {
        let innings = innings.unwrap_or(1);
        if !(1..=2).contains(&innings) {
            return Err(ScoringError::InvalidInnings(innings));
        }
        match self.phase {
            MatchPhase::Completed => {
                return Err(ScoringError::NotAcceptingDeliveries(self.phase));
            }
            MatchPhase::SecondInnings if innings != 2 => {
                return Err(ScoringError::InningsClosed { innings });
            }
            _ => {}
        }

        let (score, ledger) = self
            .innings_mut(innings)
            .ok_or(ScoringError::NothingToUndo { innings })?;
        let delivery = undo_last_delivery(score, ledger)?;

        let replacement_dropped = delivery.new_batsman.filter(|new_batsman| {
            self.ledger(innings)
                .is_some_and(|ledger| ledger.get(*new_batsman).is_none())
        });

        // The break keeps the target in step with a corrected first innings.
        if self.phase == MatchPhase::InningsBreak && innings == 1 {
            self.target = Some(self.first_innings_runs() + 1);
        }

        let in_play = innings == self.current_innings
            && matches!(
                self.phase,
                MatchPhase::FirstInnings | MatchPhase::SecondInnings
            );
        if in_play {
            self.crease.striker = Some(delivery.striker);
            self.crease.non_striker = delivery.non_striker;
            self.seat_bowler(delivery.bowler);
            if delivery.wicket {
                self.set_status(delivery.striker, PlayerStatus::Batting);
                if let Some(new_batsman) = replacement_dropped {
                    self.set_status(new_batsman, PlayerStatus::YetToBat);
                }
            }
        }

        Ok(delivery)
    }

    /// Swap the striker and the non-striker.
    pub fn swap_striker(&mut self) -> Result<(), ScoringError> {
        self.ensure_in_play()?;
        let (Some(striker), Some(non_striker)) = (self.crease.striker, self.crease.non_striker)
        else {
            return Err(ScoringError::MissingPlayer("striker and non-striker"));
        };
        self.crease.striker = Some(non_striker);
        self.crease.non_striker = Some(striker);
        Ok(())
    }

    /// Hand the ball to another bowler.
    pub fn change_bowler(&mut self, bowler: Uuid, roster: &Roster) -> Result<(), ScoringError> {
        self.ensure_in_play()?;
        roster.check_side(bowler, self.fielding_team(self.current_innings), "bowler")?;
        self.seat_bowler(bowler);
        Ok(())
    }

    fn ensure_in_play(&self) -> Result<(), ScoringError> {
        match self.phase {
            MatchPhase::FirstInnings | MatchPhase::SecondInnings => Ok(()),
            phase => Err(ScoringError::NotAcceptingDeliveries(phase)),
        }
    }

    /// Why the innings in play can take no further deliveries, if it cannot.
    pub fn innings_closed(&self, policy: &ScoringPolicy) -> Option<&'static str> {
        let score = self.current_score()?;
        if score.wickets >= policy.all_out_wickets {
            return Some("all out");
        }
        if self.current_innings == 2
            && self.target.is_some_and(|target| score.runs >= target)
        {
            return Some("target reached");
        }
        if score.legal_balls >= self.overs_limit * BALLS_PER_OVER {
            return Some("overs completed");
        }
        None
    }
}

fn describe_ball(
    score: &ScoreState,
    ball: &BallUpdate,
    striker: Uuid,
    bowler: Uuid,
    roster: &Roster,
) -> String {
    let label = score.next_ball_label();
    let who = format!(
        "{} to {}",
        roster.player_name(bowler),
        roster.player_name(striker)
    );

    let what = match (ball.extra_type, ball.runs) {
        (ExtraType::None, 0) => "no run".to_string(),
        (ExtraType::None, 4) => "FOUR".to_string(),
        (ExtraType::None, 6) => "SIX".to_string(),
        (ExtraType::None, 1) => "1 run".to_string(),
        (ExtraType::None, runs) => format!("{runs} runs"),
        (ExtraType::Wide, runs) => format!("wide, {} extra", runs + 1),
        (ExtraType::NoBall, runs) => format!("no-ball, {runs} off the bat"),
        (ExtraType::Bye, runs) => format!("{runs} bye"),
        (ExtraType::LegBye, runs) => format!("{runs} leg bye"),
    };

    if !ball.wicket {
        return format!("{label} {who}, {what}");
    }

    let dismissal = ball
        .dismissal_type
        .map(DismissalType::label)
        .unwrap_or("out");
    let mut line = format!("{label} {who}, OUT ({dismissal}), {what}");
    if let Some(new_batsman) = ball.new_batsman {
        line.push_str(&format!(", {} comes in", roster.player_name(new_batsman)));
    }
    line
}

impl From<PlayerEntity> for Player {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<Player> for PlayerEntity {
    fn from(value: Player) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<TeamEntity> for Team {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            players: value.players.into_iter().map(Into::into).collect(),
            created_at: value.created_at,
        }
    }
}

impl From<Team> for TeamEntity {
    fn from(value: Team) -> Self {
        Self {
            id: value.id,
            name: value.name,
            players: value.players.into_iter().map(Into::into).collect(),
            created_at: value.created_at,
        }
    }
}

impl From<MatchEntity> for Match {
    fn from(value: MatchEntity) -> Self {
        Self {
            id: value.id,
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
            player_statuses: value.player_statuses,
            commentary: value.commentary,
            result: value.result,
            created_at: value.created_at,
            updated_at: value.updated_at,
            version: value.version,
        }
    }
}

impl From<Match> for MatchEntity {
    fn from(value: Match) -> Self {
        Self {
            id: value.id,
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
            player_statuses: value.player_statuses,
            commentary: value.commentary,
            result: value.result,
            created_at: value.created_at,
            updated_at: value.updated_at,
            version: value.version,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::scoring::replay_ledger;

    /// Two six-player squads and a fresh 2-over match between them.
    pub(crate) struct Fixture {
        pub home: Team,
        pub away: Team,
        pub roster: Roster,
        pub game: Match,
    }

    impl Fixture {
        pub fn new() -> Self {
            let home = Team::new(
                "Strikers".into(),
                (1..=6).map(|n| format!("Home {n}")).collect(),
            );
            let away = Team::new(
                "Chargers".into(),
                (1..=6).map(|n| format!("Away {n}")).collect(),
            );
            let game = Match::new(&home, &away, home.id, 2);
            let roster = Roster::new(vec![home.clone(), away.clone()]);
            Self {
                home,
                away,
                roster,
                game,
            }
        }

        pub fn home_player(&self, index: usize) -> Uuid {
            self.home.players[index].id
        }

        pub fn away_player(&self, index: usize) -> Uuid {
            self.away.players[index].id
        }

        /// Ball from the first innings openers against the first away bowler.
        pub fn opening_ball(&self, runs: u32, extra_type: ExtraType) -> BallUpdate {
            BallUpdate {
                runs,
                extra_type,
                striker: Some(self.home_player(0)),
                non_striker: Some(self.home_player(1)),
                bowler: Some(self.away_player(0)),
                ..BallUpdate::default()
            }
        }

        pub fn assert_consistent(&self) {
            for score in &self.game.scores {
                let ledger = self.game.ledger(score.innings).unwrap();
                assert_eq!(&replay_ledger(score), ledger);
            }
        }
    }

    #[test]
    fn first_ball_lazily_starts_the_match() {
        let mut fx = Fixture::new();
        let ball = fx.opening_ball(1, ExtraType::None);
        fx.game.record_ball(ball, &fx.roster).unwrap();

        assert_eq!(fx.game.phase, MatchPhase::FirstInnings);
        assert_eq!(fx.game.status, MatchStatus::Live);
        assert_eq!(fx.game.current_score().unwrap().runs, 1);
        assert_eq!(fx.game.crease.bowler, Some(fx.away_player(0)));
        assert_eq!(
            fx.game.player_statuses.get(&fx.away_player(0)),
            Some(&PlayerStatus::Bowling)
        );
        assert_eq!(
            fx.game.current_score().unwrap().commentary,
            vec!["0.1 Away 1 to Home 1, 1 run".to_string()]
        );
        fx.assert_consistent();
    }

    #[test]
    fn later_balls_reuse_the_crease() {
        let mut fx = Fixture::new();
        let ball = fx.opening_ball(4, ExtraType::None);
        fx.game.record_ball(ball, &fx.roster).unwrap();

        let follow_up = BallUpdate {
            runs: 2,
            ..BallUpdate::default()
        };
        fx.game.record_ball(follow_up, &fx.roster).unwrap();

        let ledger = fx.game.current_ledger().unwrap();
        assert_eq!(ledger.get(fx.home_player(0)).unwrap().runs, 6);
        fx.assert_consistent();
    }

    #[test]
    fn bowler_from_the_batting_side_is_rejected() {
        let mut fx = Fixture::new();
        let mut ball = fx.opening_ball(0, ExtraType::None);
        ball.bowler = Some(fx.home_player(3));

        let err = fx.game.record_ball(ball, &fx.roster).unwrap_err();
        assert_eq!(
            err,
            ScoringError::WrongSide {
                player: fx.home_player(3),
                role: "bowler",
            }
        );
        assert!(fx.game.scores.is_empty());
        assert_eq!(fx.game.phase, MatchPhase::PreMatch);
        assert_eq!(fx.game.status, MatchStatus::Upcoming);
    }

    #[test]
    fn unknown_player_is_reported() {
        let mut fx = Fixture::new();
        let stranger = Uuid::new_v4();
        let mut ball = fx.opening_ball(0, ExtraType::None);
        ball.striker = Some(stranger);

        let err = fx.game.record_ball(ball, &fx.roster).unwrap_err();
        assert_eq!(err, ScoringError::UnknownPlayer(stranger));
    }

    #[test]
    fn wicket_seats_the_new_batsman_and_undo_restores_the_striker() {
        let mut fx = Fixture::new();
        let opener = fx.home_player(0);
        let replacement = fx.home_player(2);
        let warm_up = fx.opening_ball(1, ExtraType::None);
        fx.game.record_ball(warm_up, &fx.roster).unwrap();
        let before = fx.game.clone();

        let mut wicket = fx.opening_ball(0, ExtraType::None);
        wicket.wicket = true;
        wicket.dismissal_type = Some(DismissalType::Bowled);
        wicket.new_batsman = Some(replacement);
        fx.game.record_ball(wicket, &fx.roster).unwrap();

        assert_eq!(fx.game.crease.striker, Some(replacement));
        assert_eq!(
            fx.game.player_statuses.get(&opener),
            Some(&PlayerStatus::Out)
        );
        fx.assert_consistent();

        let undone = fx.game.undo_ball(None).unwrap();
        assert!(undone.wicket);
        assert_eq!(fx.game.crease.striker, Some(opener));
        assert_eq!(
            fx.game.player_statuses.get(&replacement),
            Some(&PlayerStatus::YetToBat)
        );
        assert_eq!(fx.game.scores, before.scores);
        assert_eq!(fx.game.ledgers, before.ledgers);
        fx.assert_consistent();
    }

    #[test]
    fn dismissed_batter_cannot_face_again() {
        let mut fx = Fixture::new();
        let mut wicket = fx.opening_ball(0, ExtraType::None);
        wicket.wicket = true;
        wicket.dismissal_type = Some(DismissalType::Lbw);
        fx.game.record_ball(wicket, &fx.roster).unwrap();

        let again = fx.opening_ball(0, ExtraType::None);
        let err = fx.game.record_ball(again, &fx.roster).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidDelivery(_)));
    }

    #[test]
    fn undo_without_deliveries_fails() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.game.undo_ball(None).unwrap_err(),
            ScoringError::NothingToUndo { innings: 1 }
        );
    }

    #[test]
    fn swap_striker_exchanges_ends() {
        let mut fx = Fixture::new();
        let ball = fx.opening_ball(1, ExtraType::None);
        fx.game.record_ball(ball, &fx.roster).unwrap();

        fx.game.swap_striker().unwrap();
        assert_eq!(fx.game.crease.striker, Some(fx.home_player(1)));
        assert_eq!(fx.game.crease.non_striker, Some(fx.home_player(0)));
    }

    #[test]
    fn change_bowler_updates_statuses() {
        let mut fx = Fixture::new();
        let ball = fx.opening_ball(0, ExtraType::None);
        fx.game.record_ball(ball, &fx.roster).unwrap();

        fx.game.change_bowler(fx.away_player(1), &fx.roster).unwrap();
        assert_eq!(fx.game.crease.bowler, Some(fx.away_player(1)));
        assert_eq!(
            fx.game.player_statuses.get(&fx.away_player(0)),
            Some(&PlayerStatus::Fielding)
        );
        assert_eq!(
            fx.game.player_statuses.get(&fx.away_player(1)),
            Some(&PlayerStatus::Bowling)
        );
    }

    #[test]
    fn innings_closes_when_the_overs_run_out() {
        let mut fx = Fixture::new();
        let policy = ScoringPolicy::default();
        for _ in 0..12 {
            let ball = fx.opening_ball(1, ExtraType::None);
            fx.game.record_ball(ball, &fx.roster).unwrap();
        }
        assert_eq!(fx.game.innings_closed(&policy), Some("overs completed"));
    }
}
