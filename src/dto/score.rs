use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{format_system_time, validation::{error, validate_innings}},
    services::score_service::ScoreAction,
    state::{
        innings::{MatchPhase, OpeningLineup},
        matches::{BallUpdate, Crease, Match, MatchStatus, PlayerStatus, Roster},
        scoring::{
            DismissalType, ExtraType, Over, PlayerStatLedger, PlayerStats, ScoreState,
            ScoringPolicy,
        },
    },
};

/// Highest run value a single delivery can carry (five wides plus overthrows).
const MAX_RUNS_PER_BALL: u32 = 7;

/// Wicket flag as sent by scorer clients: `true`/`false` or a 0/1 count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum WicketCount {
    /// Boolean form.
    Flag(bool),
    /// Count form.
    Count(u32),
}

impl WicketCount {
    fn count(self) -> u32 {
        match self {
            WicketCount::Flag(flag) => u32::from(flag),
            WicketCount::Count(count) => count,
        }
    }
}

/// Innings-level status change requested by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum InningStatus {
    /// Close the first innings.
    #[serde(rename = "innings break", alias = "innings_break", alias = "inningsBreak")]
    InningsBreak,
    /// Open the second innings.
    #[serde(rename = "second innings", alias = "second_innings", alias = "secondInnings")]
    SecondInnings,
}

/// Body of `PUT /matches/{id}/score`; exactly one action must be selected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdateRequest {
    /// Record one delivery.
    #[serde(default)]
    pub ball_update: bool,
    /// Reverse the last delivery of `innings` (default 1).
    #[serde(default)]
    pub undo_last_ball: bool,
    /// Swap striker and non-striker.
    #[serde(default)]
    pub swap_striker: bool,
    /// Hand the ball to `bowler`.
    #[serde(default)]
    pub change_bowler: bool,
    /// Move the match to another public status.
    pub match_status: Option<MatchStatus>,
    /// Innings break or second innings.
    pub inning_status: Option<InningStatus>,
    /// Runs off the bat or as extras.
    #[serde(default)]
    pub runs: u32,
    /// Wicket flag (`true` or `1`).
    pub wickets: Option<WicketCount>,
    /// Batter on strike.
    pub striker: Option<Uuid>,
    /// Batter at the other end.
    pub non_striker: Option<Uuid>,
    /// Bowler of the delivery, or the new bowler.
    pub bowler: Option<Uuid>,
    /// Extra attached to the delivery.
    #[serde(default)]
    pub extra_type: ExtraType,
    /// Dismissal kind when a wicket fell.
    pub dismissal_type: Option<DismissalType>,
    /// Replacement batter after a wicket.
    pub new_batsman: Option<Uuid>,
    /// Innings targeted by the action.
    pub innings: Option<u8>,
}

impl ScoreUpdateRequest {
    fn selected_actions(&self) -> Vec<&'static str> {
        [
            (self.ball_update, "ballUpdate"),
            (self.undo_last_ball, "undoLastBall"),
            (self.swap_striker, "swapStriker"),
            (self.change_bowler, "changeBowler"),
            (self.match_status.is_some(), "matchStatus"),
            (self.inning_status.is_some(), "inningStatus"),
        ]
        .into_iter()
        .filter_map(|(selected, name)| selected.then_some(name))
        .collect()
    }

    fn wicket_count(&self) -> u32 {
        self.wickets.map(WicketCount::count).unwrap_or_default()
    }
}

impl Validate for ScoreUpdateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let selected = self.selected_actions();
        if selected.len() != 1 {
            errors.add(
                "action",
                error(
                    "exactly_one_action",
                    format!(
                        "exactly one action must be selected (got {})",
                        if selected.is_empty() {
                            "none".to_string()
                        } else {
                            selected.join(", ")
                        }
                    ),
                ),
            );
        }

        if self.runs > MAX_RUNS_PER_BALL {
            errors.add(
                "runs",
                error(
                    "runs_range",
                    format!("runs must be at most {MAX_RUNS_PER_BALL} (got {})", self.runs),
                ),
            );
        }

        if self.wicket_count() > 1 {
            errors.add(
                "wickets",
                error(
                    "wickets_range",
                    "at most one wicket falls on a delivery".to_string(),
                ),
            );
        }

        if let Some(innings) = self.innings {
            if let Err(err) = validate_innings(innings) {
                errors.add("innings", err);
            }
        }

        if self.change_bowler && self.bowler.is_none() {
            errors.add(
                "bowler",
                error("bowler_required", "changeBowler requires `bowler`".to_string()),
            );
        }

        if self.ball_update
            && self.wicket_count() == 0
            && (self.dismissal_type.is_some() || self.new_batsman.is_some())
        {
            errors.add(
                "wickets",
                error(
                    "wicket_required",
                    "dismissalType and newBatsman require a wicket".to_string(),
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl TryFrom<ScoreUpdateRequest> for ScoreAction {
    type Error = ValidationErrors;

    fn try_from(request: ScoreUpdateRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        let wicket = request.wicket_count() == 1;

        let action = if request.ball_update {
            ScoreAction::Ball(BallUpdate {
                runs: request.runs,
                extra_type: request.extra_type,
                wicket,
                dismissal_type: request.dismissal_type,
                striker: request.striker,
                non_striker: request.non_striker,
                bowler: request.bowler,
                new_batsman: request.new_batsman,
                innings: request.innings,
            })
        } else if request.undo_last_ball {
            ScoreAction::Undo {
                innings: request.innings,
            }
        } else if request.swap_striker {
            ScoreAction::SwapStriker
        } else if let (true, Some(bowler)) = (request.change_bowler, request.bowler) {
            ScoreAction::ChangeBowler(bowler)
        } else if let Some(status) = request.match_status {
            ScoreAction::MatchStatus(status)
        } else {
            match request.inning_status {
                Some(InningStatus::InningsBreak) => ScoreAction::InningsBreak,
                // validate() guarantees an action was selected.
                Some(InningStatus::SecondInnings) | None => {
                    ScoreAction::SecondInnings(OpeningLineup {
                        striker: request.striker,
                        non_striker: request.non_striker,
                        bowler: request.bowler,
                    })
                }
            }
        };

        Ok(action)
    }
}

/// Batting figures of one player, with their name resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatterCard {
    /// Player id.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
    /// Runs scored.
    pub runs: u32,
    /// Legal balls faced.
    pub balls_faced: u32,
    /// Fours hit.
    pub fours: u32,
    /// Sixes hit.
    pub sixes: u32,
    /// Runs per hundred balls.
    pub strike_rate: f64,
    /// Whether the batter is out.
    pub is_out: bool,
    /// Dismissal description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissal: Option<String>,
}

impl BatterCard {
    fn new(stats: &PlayerStats, roster: &Roster) -> Self {
        Self {
            player_id: stats.player_id,
            name: roster.player_name(stats.player_id).to_string(),
            runs: stats.runs,
            balls_faced: stats.balls_faced,
            fours: stats.fours,
            sixes: stats.sixes,
            strike_rate: stats.strike_rate,
            is_out: stats.is_out,
            dismissal: stats.dismissal.clone(),
        }
    }
}

/// Bowling figures of one player, with their name resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BowlerCard {
    /// Player id.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
    /// Overs in `overs.balls` notation.
    pub overs: f64,
    /// Maiden overs.
    pub maidens: u32,
    /// Runs conceded.
    pub runs_conceded: u32,
    /// Wickets taken.
    pub wickets: u32,
    /// Runs per over.
    pub economy: f64,
    /// Wide runs conceded.
    pub wides: u32,
    /// No-balls bowled.
    pub noballs: u32,
}

impl BowlerCard {
    fn new(stats: &PlayerStats, roster: &Roster) -> Self {
        Self {
            player_id: stats.player_id,
            name: roster.player_name(stats.player_id).to_string(),
            overs: stats.overs,
            maidens: stats.maidens,
            runs_conceded: stats.runs_conceded,
            wickets: stats.wickets,
            economy: stats.economy,
            wides: stats.wides,
            noballs: stats.noballs,
        }
    }
}

/// One over rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverSummary {
    /// 1-based over number.
    pub over: u32,
    /// Bowler of the over.
    pub bowler: Option<String>,
    /// Ball-by-ball notation (`1`, `4`, `1wd`, `W`).
    pub balls: Vec<String>,
    /// Runs conceded in the over.
    pub runs: u32,
    /// Wickets in the over.
    pub wickets: u32,
    /// Whether the over is finished.
    pub completed: bool,
    /// One-line rendering, e.g. `Over 3 (J. Doe): 1 4 1wd 0 W 2 | 8 runs, 1 wkt`.
    pub summary: String,
}

impl OverSummary {
    fn new(over: &Over, roster: &Roster) -> Self {
        let bowler = over
            .bowler
            .map(|bowler| roster.player_name(bowler).to_string());
        let balls: Vec<String> = over.deliveries.iter().map(|delivery| delivery.notation()).collect();
        let mut summary = match &bowler {
            Some(name) => format!("Over {} ({name}):", over.number),
            None => format!("Over {}:", over.number),
        };
        for ball in &balls {
            summary.push(' ');
            summary.push_str(ball);
        }
        summary.push_str(&format!(" | {} runs", over.runs));
        if over.wickets > 0 {
            summary.push_str(&format!(", {} wkt", over.wickets));
        }
        if over.maiden {
            summary.push_str(" (maiden)");
        }

        Self {
            over: over.number,
            bowler,
            balls,
            runs: over.runs,
            wickets: over.wickets,
            completed: over.is_complete(),
            summary,
        }
    }

    /// Every over of an innings including the one in progress, oldest first.
    pub fn for_innings(score: &ScoreState, roster: &Roster) -> Vec<Self> {
        score
            .over_history
            .iter()
            .chain(
                Some(&score.current_over).filter(|over| !over.deliveries.is_empty()),
            )
            .map(|over| Self::new(over, roster))
            .collect()
    }
}

/// Full match document as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    /// Match id.
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
    /// Current striker.
    pub current_striker: Option<Uuid>,
    /// Current non-striker.
    pub non_striker: Option<Uuid>,
    /// Current bowler.
    pub current_bowler: Option<Uuid>,
    /// Per-innings totals and overs.
    pub scores: Vec<ScoreState>,
    /// Per-innings player figures.
    pub player_stats: Vec<PlayerStatLedger>,
    /// Field status per player.
    #[schema(value_type = Object)]
    pub player_statuses: IndexMap<Uuid, PlayerStatus>,
    /// Match-level commentary.
    pub commentary: Vec<String>,
    /// Result line once completed.
    pub result: Option<String>,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last mutation.
    pub updated_at: String,
    /// Concurrency token.
    pub version: u64,
}

impl From<&Match> for MatchView {
    fn from(game: &Match) -> Self {
        let Crease {
            striker,
            non_striker,
            bowler,
        } = game.crease;
        Self {
            id: game.id,
            home_team: game.home_team,
            away_team: game.away_team,
            batting_first: game.batting_first,
            overs_limit: game.overs_limit,
            status: game.status,
            phase: game.phase,
            current_innings: game.current_innings,
            target: game.target,
            current_striker: striker,
            non_striker,
            current_bowler: bowler,
            scores: game.scores.clone(),
            player_stats: game.ledgers.clone(),
            player_statuses: game.player_statuses.clone(),
            commentary: game.commentary.clone(),
            result: game.result.clone(),
            created_at: format_system_time(game.created_at),
            updated_at: format_system_time(game.updated_at),
            version: game.version,
        }
    }
}

/// Response envelope of `PUT /matches/{id}/score`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdateResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// Human readable outcome.
    pub message: String,
    /// Updated match document.
    #[serde(rename = "match")]
    pub game: MatchView,
    /// Overs of the innings in play.
    pub over_summary: Vec<OverSummary>,
    /// Current striker with live figures.
    pub striker: Option<BatterCard>,
    /// Current non-striker with live figures.
    pub non_striker: Option<BatterCard>,
    /// Current bowler with live figures.
    pub bowler: Option<BowlerCard>,
    /// Chase target (second innings only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    /// Runs still needed (second innings only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_runs: Option<u32>,
    /// Wickets in hand (second innings only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_wickets: Option<u32>,
}

impl ScoreUpdateResponse {
    /// Assemble the envelope from the saved match.
    pub fn new(message: String, game: &Match, roster: &Roster, policy: &ScoringPolicy) -> Self {
        let ledger = game.current_ledger();
        let figures = |player: Option<Uuid>| {
            player.map(|id| {
                ledger
                    .and_then(|ledger| ledger.get(id))
                    .cloned()
                    .unwrap_or_else(|| PlayerStats::new(id))
            })
        };

        let chase = game.chase(policy);
        Self {
            success: true,
            message,
            game: MatchView::from(game),
            over_summary: game
                .current_score()
                .map(|score| OverSummary::for_innings(score, roster))
                .unwrap_or_default(),
            striker: figures(game.crease.striker).map(|stats| BatterCard::new(&stats, roster)),
            non_striker: figures(game.crease.non_striker)
                .map(|stats| BatterCard::new(&stats, roster)),
            bowler: figures(game.crease.bowler).map(|stats| BowlerCard::new(&stats, roster)),
            target: chase.map(|chase| chase.target),
            required_runs: chase.map(|chase| chase.required_runs),
            remaining_wickets: chase.map(|chase| chase.remaining_wickets),
        }
    }
}

/// Extras conceded in an innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasCard {
    /// Wide runs, penalties included.
    pub wides: u32,
    /// No-ball penalties.
    pub noballs: u32,
    /// Byes.
    pub byes: u32,
    /// Leg byes.
    pub legbyes: u32,
    /// Sum of the above.
    pub total: u32,
}

/// Scorecard of one innings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InningsCard {
    /// Innings number.
    pub innings: u8,
    /// Batting side.
    pub batting_team: Uuid,
    /// Batting side name.
    pub batting_team_name: String,
    /// Team runs.
    pub runs: u32,
    /// Wickets fallen.
    pub wickets: u32,
    /// Overs in `overs.balls` notation.
    pub overs: f64,
    /// Runs per over.
    pub run_rate: f64,
    /// Extras breakdown.
    pub extras: ExtrasCard,
    /// Batters who came to the crease, in order.
    pub batting: Vec<BatterCard>,
    /// Bowlers who bowled, in order.
    pub bowling: Vec<BowlerCard>,
    /// Every over of the innings.
    pub overs_bowled: Vec<OverSummary>,
    /// Ball-by-ball commentary.
    pub commentary: Vec<String>,
}

impl InningsCard {
    fn new(game: &Match, score: &ScoreState, roster: &Roster) -> Self {
        let batting_team = game.batting_team(score.innings);
        let entries: &[PlayerStats] = game
            .ledger(score.innings)
            .map(|ledger| ledger.players.as_slice())
            .unwrap_or_default();

        let batting = entries
            .iter()
            .filter(|stats| roster.team_of(stats.player_id) == Some(batting_team))
            .map(|stats| BatterCard::new(stats, roster))
            .collect();
        let bowlers: Vec<&PlayerStats> = entries
            .iter()
            .filter(|stats| stats.balls_bowled > 0 || stats.runs_conceded > 0)
            .collect();

        let mut extras = ExtrasCard::default();
        for stats in &bowlers {
            extras.wides += stats.wides;
            extras.noballs += stats.noballs;
            extras.byes += stats.byes;
            extras.legbyes += stats.legbyes;
        }
        extras.total = extras.wides + extras.noballs + extras.byes + extras.legbyes;

        Self {
            innings: score.innings,
            batting_team,
            batting_team_name: roster.team_name(batting_team).to_string(),
            runs: score.runs,
            wickets: score.wickets,
            overs: score.overs,
            run_rate: score.run_rate,
            extras,
            batting,
            bowling: bowlers
                .into_iter()
                .map(|stats| BowlerCard::new(stats, roster))
                .collect(),
            overs_bowled: OverSummary::for_innings(score, roster),
            commentary: score.commentary.clone(),
        }
    }
}

/// Response of `GET /matches/{id}/scoreboard`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardResponse {
    /// Match id.
    pub match_id: Uuid,
    /// Public status.
    pub status: MatchStatus,
    /// Innings phase.
    pub phase: MatchPhase,
    /// Chase target.
    pub target: Option<u32>,
    /// Result line once completed.
    pub result: Option<String>,
    /// Innings scorecards, in order.
    pub innings: Vec<InningsCard>,
}

impl ScoreboardResponse {
    /// Build the scorecard of every started innings.
    pub fn new(game: &Match, roster: &Roster) -> Self {
        let mut scores: Vec<&ScoreState> = game.scores.iter().collect();
        scores.sort_by_key(|score| score.innings);
        Self {
            match_id: game.id,
            status: game.status,
            phase: game.phase,
            target: game.target,
            result: game.result.clone(),
            innings: scores
                .into_iter()
                .map(|score| InningsCard::new(game, score, roster))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::matches::tests::Fixture;

    fn parse(json: &str) -> ScoreUpdateRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn ball_update_becomes_a_ball_action() {
        let striker = Uuid::new_v4();
        let request = parse(&format!(
            r#"{{"ballUpdate": true, "runs": 4, "extraType": "noball", "striker": "{striker}", "innings": 1}}"#
        ));

        match ScoreAction::try_from(request).unwrap() {
            ScoreAction::Ball(ball) => {
                assert_eq!(ball.runs, 4);
                assert_eq!(ball.extra_type, ExtraType::NoBall);
                assert_eq!(ball.striker, Some(striker));
                assert!(!ball.wicket);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn wicket_accepts_boolean_and_count_forms() {
        for body in [
            r#"{"ballUpdate": true, "wickets": true, "dismissalType": "runout"}"#,
            r#"{"ballUpdate": true, "wickets": 1, "dismissalType": "runout"}"#,
        ] {
            let ScoreAction::Ball(ball) = ScoreAction::try_from(parse(body)).unwrap() else {
                panic!("expected a ball action");
            };
            assert!(ball.wicket);
            assert_eq!(ball.dismissal_type, Some(DismissalType::RunOut));
        }
    }

    #[test]
    fn exactly_one_action_is_required() {
        assert!(parse("{}").validate().is_err());
        assert!(parse(r#"{"ballUpdate": true, "swapStriker": true}"#).validate().is_err());
        assert!(parse(r#"{"swapStriker": true}"#).validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let errors = parse(r#"{"ballUpdate": true, "runs": 9, "wickets": 2, "innings": 3}"#)
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("runs"));
        assert!(fields.contains_key("wickets"));
        assert!(fields.contains_key("innings"));
    }

    #[test]
    fn change_bowler_needs_a_bowler() {
        assert!(parse(r#"{"changeBowler": true}"#).validate().is_err());
    }

    #[test]
    fn status_spellings_are_accepted() {
        let action = ScoreAction::try_from(parse(r#"{"inningStatus": "innings break"}"#)).unwrap();
        assert!(matches!(action, ScoreAction::InningsBreak));

        let action =
            ScoreAction::try_from(parse(r#"{"inningStatus": "second innings"}"#)).unwrap();
        assert!(matches!(action, ScoreAction::SecondInnings(_)));

        let action = ScoreAction::try_from(parse(r#"{"matchStatus": "completed"}"#)).unwrap();
        assert!(matches!(action, ScoreAction::MatchStatus(MatchStatus::Completed)));
    }

    #[test]
    fn response_carries_live_figures_and_over_summary() {
        let mut fx = Fixture::new();
        for runs in [1, 0, 4] {
            let ball = fx.opening_ball(runs, ExtraType::None);
            fx.game.record_ball(ball, &fx.roster).unwrap();
        }
        let wide = fx.opening_ball(0, ExtraType::Wide);
        fx.game.record_ball(wide, &fx.roster).unwrap();

        let response =
            ScoreUpdateResponse::new("ok".into(), &fx.game, &fx.roster, &ScoringPolicy::default());
        let striker = response.striker.unwrap();
        assert_eq!(striker.name, "Home 1");
        assert_eq!((striker.runs, striker.balls_faced, striker.fours), (5, 3, 1));
        assert_eq!(response.bowler.unwrap().runs_conceded, 6);
        assert_eq!(response.over_summary.len(), 1);
        assert_eq!(response.over_summary[0].balls, vec!["1", "0", "4", "1wd"]);
        assert_eq!(
            response.over_summary[0].summary,
            "Over 1 (Away 1): 1 0 4 1wd | 6 runs"
        );
        assert!(response.target.is_none());

        let json = serde_json::to_value(
            ScoreUpdateResponse::new("ok".into(), &fx.game, &fx.roster, &ScoringPolicy::default()),
        )
        .unwrap();
        assert!(json.get("match").is_some());
        assert!(json.get("requiredRuns").is_none());
    }

    #[test]
    fn scoreboard_splits_batting_bowling_and_extras() {
        let mut fx = Fixture::new();
        for (runs, extra) in [
            (2, ExtraType::None),
            (1, ExtraType::Bye),
            (0, ExtraType::Wide),
            (3, ExtraType::NoBall),
        ] {
            let ball = fx.opening_ball(runs, extra);
            fx.game.record_ball(ball, &fx.roster).unwrap();
        }

        let board = ScoreboardResponse::new(&fx.game, &fx.roster);
        let card = &board.innings[0];
        assert_eq!(card.runs, 8);
        assert_eq!(card.batting_team_name, "Strikers");
        assert_eq!(card.batting.len(), 2);
        assert_eq!(card.bowling.len(), 1);
        assert_eq!(
            card.extras,
            ExtrasCard {
                wides: 1,
                noballs: 1,
                byes: 1,
                legbyes: 0,
                total: 3,
            }
        );
    }
}
