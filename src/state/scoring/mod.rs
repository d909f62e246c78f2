//! Cricket ball-by-ball scoring primitives.
//!
//! Every figure on a scorecard is derived from the [`Delivery`] records kept in
//! the over tracker. The delivery processor and the undo engine apply and
//! reverse the same per-delivery deltas, and [`ledger::replay_ledger`] rebuilds
//! the player ledger from scratch so both paths can be checked against each
//! other.

pub mod delivery;
pub mod ledger;
pub mod over_tracker;
pub mod undo;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::innings::{InvalidTransition, MatchPhase};

pub use self::delivery::{DeliveryOutcome, apply_delivery};
pub use self::ledger::{PlayerStatLedger, PlayerStats, replay_ledger, replay_player};
pub use self::over_tracker::OverProgress;
pub use self::undo::undo_last_delivery;

/// Legal deliveries that make up one over.
pub const BALLS_PER_OVER: u32 = 6;
/// Wickets that end an innings unless configured otherwise.
pub const DEFAULT_ALL_OUT_WICKETS: u32 = 10;

/// Match-wide scoring rules that are not derived from the rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Number of wickets after which a side is all out.
    pub all_out_wickets: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            all_out_wickets: DEFAULT_ALL_OUT_WICKETS,
        }
    }
}

/// Kind of extra attached to a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExtraType {
    /// Regular delivery, runs are credited to the striker.
    #[default]
    None,
    /// Wide: illegal, one penalty run, no batting credit.
    Wide,
    /// No-ball: illegal, one penalty run, bat runs still count for the striker.
    #[serde(alias = "no_ball", alias = "no-ball")]
    NoBall,
    /// Byes: legal, runs go to the team only.
    Bye,
    /// Leg byes: legal, runs go to the team only.
    #[serde(alias = "leg_bye", alias = "leg-bye")]
    LegBye,
}

impl ExtraType {
    /// Whether a delivery with this extra counts toward the six-ball over.
    pub fn is_legal(self) -> bool {
        !matches!(self, ExtraType::Wide | ExtraType::NoBall)
    }

    /// Penalty runs added to the team total on top of the recorded runs.
    pub fn penalty_runs(self) -> u32 {
        if self.is_legal() { 0 } else { 1 }
    }
}

/// How the striker was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DismissalType {
    /// Bowled.
    Bowled,
    /// Caught by a fielder or the keeper.
    Caught,
    /// Leg before wicket.
    Lbw,
    /// Stumped by the keeper.
    Stumped,
    /// Batter broke their own wicket.
    #[serde(alias = "hit_wicket", alias = "hit-wicket")]
    HitWicket,
    /// Run out; never credited to the bowler.
    #[serde(alias = "run_out", alias = "run-out")]
    RunOut,
}

impl DismissalType {
    /// Dismissals that count toward the bowler's wickets.
    pub fn credited_to_bowler(self) -> bool {
        !matches!(self, DismissalType::RunOut)
    }

    /// Scorecard wording for the dismissal.
    pub fn label(self) -> &'static str {
        match self {
            DismissalType::Bowled => "bowled",
            DismissalType::Caught => "caught",
            DismissalType::Lbw => "lbw",
            DismissalType::Stumped => "stumped",
            DismissalType::HitWicket => "hit wicket",
            DismissalType::RunOut => "run out",
        }
    }
}

/// One bowled event, legal or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Legal slot within the over (1..=6); illegal deliveries carry the slot of the next legal ball.
    pub sequence: u32,
    /// Runs off the bat, or the bye/leg-bye/wide runs taken.
    pub runs: u32,
    /// Extra attached to the delivery.
    pub extra_type: ExtraType,
    /// Whether a wicket fell.
    pub wicket: bool,
    /// Kind of dismissal when `wicket` is set.
    pub dismissal_type: Option<DismissalType>,
    /// Batter on strike.
    pub striker: Uuid,
    /// Batter at the non-striker's end.
    pub non_striker: Option<Uuid>,
    /// Bowler of the delivery.
    pub bowler: Uuid,
    /// Replacement batter seated after a wicket.
    pub new_batsman: Option<Uuid>,
    /// Commentary line recorded with the delivery.
    #[serde(default)]
    pub commentary: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Ledger entries created by this delivery, removed again on undo.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opened_entries: Vec<Uuid>,
}

impl Delivery {
    /// Build a delivery without a wicket.
    pub fn new(striker: Uuid, bowler: Uuid, runs: u32, extra_type: ExtraType) -> Self {
        Self {
            sequence: 0,
            runs,
            extra_type,
            wicket: false,
            dismissal_type: None,
            striker,
            non_striker: None,
            bowler,
            new_batsman: None,
            commentary: String::new(),
            timestamp_ms: now_ms(),
            opened_entries: Vec::new(),
        }
    }

    /// Attach a non-striker.
    pub fn with_non_striker(mut self, non_striker: Option<Uuid>) -> Self {
        self.non_striker = non_striker;
        self
    }

    /// Mark the delivery as a wicket, optionally seating a replacement batter.
    pub fn with_wicket(
        mut self,
        dismissal_type: Option<DismissalType>,
        new_batsman: Option<Uuid>,
    ) -> Self {
        self.wicket = true;
        self.dismissal_type = dismissal_type;
        self.new_batsman = new_batsman;
        self
    }

    /// Attach a commentary line.
    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = commentary.into();
        self
    }

    /// Whether the delivery counts toward the six-ball over.
    pub fn is_legal(&self) -> bool {
        self.extra_type.is_legal()
    }

    /// Contribution to the team total, penalty included.
    pub fn team_runs(&self) -> u32 {
        self.runs + self.extra_type.penalty_runs()
    }

    /// Runs credited to the striker personally.
    pub fn batter_runs(&self) -> u32 {
        match self.extra_type {
            ExtraType::None | ExtraType::NoBall => self.runs,
            ExtraType::Wide | ExtraType::Bye | ExtraType::LegBye => 0,
        }
    }

    /// Whether the striker is charged with a ball faced.
    pub fn counts_as_ball_faced(&self) -> bool {
        matches!(
            self.extra_type,
            ExtraType::None | ExtraType::Bye | ExtraType::LegBye
        )
    }

    /// Whether the wicket is credited to the bowler.
    ///
    /// Stumped off a wide is the one illegal delivery that still credits the bowler.
    pub fn bowler_wicket(&self) -> bool {
        let Some(dismissal) = self.dismissal_type.filter(|_| self.wicket) else {
            return false;
        };
        dismissal.credited_to_bowler()
            && (self.is_legal()
                || (self.extra_type == ExtraType::Wide && dismissal == DismissalType::Stumped))
    }

    /// Players referenced by this delivery, in ledger insertion order.
    pub fn participants(&self) -> impl Iterator<Item = Uuid> + '_ {
        [
            Some(self.striker),
            self.non_striker,
            Some(self.bowler),
            self.new_batsman,
        ]
        .into_iter()
        .flatten()
    }

    /// Short notation used in over summaries (`4`, `1wd`, `5nb`, `2lb`, `W`).
    pub fn notation(&self) -> String {
        let base = match self.extra_type {
            ExtraType::None => self.runs.to_string(),
            ExtraType::Wide => format!("{}wd", self.team_runs()),
            ExtraType::NoBall => format!("{}nb", self.team_runs()),
            ExtraType::Bye => format!("{}b", self.runs),
            ExtraType::LegBye => format!("{}lb", self.runs),
        };

        match (self.wicket, self.extra_type, self.runs) {
            (false, _, _) => base,
            (true, ExtraType::None, 0) => "W".to_string(),
            (true, _, _) => format!("W+{base}"),
        }
    }
}

/// One over: up to six legal deliveries plus any wides and no-balls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Over {
    /// 1-based over number within the innings.
    pub number: u32,
    /// Bowler who opened the over.
    pub bowler: Option<Uuid>,
    /// Deliveries in bowling order.
    pub deliveries: Vec<Delivery>,
    /// Team runs conceded in the over.
    pub runs: u32,
    /// Wickets that fell in the over.
    pub wickets: u32,
    /// Legal deliveries bowled so far.
    pub legal_balls: u32,
    /// Set once a completed over has been credited as a maiden.
    #[serde(default)]
    pub maiden: bool,
}

impl Over {
    /// Empty over with the given number.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Whether all six legal deliveries have been bowled.
    pub fn is_complete(&self) -> bool {
        self.legal_balls >= BALLS_PER_OVER
    }

    /// A completed over that conceded nothing and was bowled by one bowler.
    pub fn qualifies_as_maiden(&self) -> bool {
        self.is_complete()
            && self.runs == 0
            && self
                .deliveries
                .iter()
                .all(|delivery| Some(delivery.bowler) == self.bowler)
    }
}

/// Running total of one innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreState {
    /// Innings number (1 or 2).
    pub innings: u8,
    /// Team runs.
    pub runs: u32,
    /// Wickets fallen.
    pub wickets: u32,
    /// Legal deliveries bowled in the innings.
    pub legal_balls: u32,
    /// Overs in `overs.balls` notation (4.3 = four overs and three balls).
    pub overs: f64,
    /// Runs per over, two decimals.
    pub run_rate: f64,
    /// Over currently being bowled.
    pub current_over: Over,
    /// Completed overs, oldest first.
    pub over_history: Vec<Over>,
    /// Commentary lines, one per delivery that carried one.
    pub commentary: Vec<String>,
}

impl ScoreState {
    /// Fresh innings with nothing bowled.
    pub fn new(innings: u8) -> Self {
        Self {
            innings,
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            overs: 0.0,
            run_rate: 0.0,
            current_over: Over::new(1),
            over_history: Vec::new(),
            commentary: Vec::new(),
        }
    }

    /// Every delivery of the innings, in bowling order.
    pub fn deliveries(&self) -> impl Iterator<Item = &Delivery> {
        self.over_history
            .iter()
            .chain(std::iter::once(&self.current_over))
            .flat_map(|over| over.deliveries.iter())
    }

    /// Recompute the derived `overs` and `run_rate` fields.
    pub(crate) fn refresh_derived(&mut self) {
        self.overs = encode_overs(self.legal_balls);
        self.run_rate = per_over_rate(self.runs, self.legal_balls);
    }
}

/// Domain errors raised by the scoring core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Neither the current over nor the history holds a delivery.
    #[error("no delivery to undo in innings {innings}")]
    NothingToUndo {
        /// Innings that was targeted.
        innings: u8,
    },
    /// The innings has been closed and can no longer be corrected.
    #[error("innings {innings} is closed")]
    InningsClosed {
        /// Innings that was targeted.
        innings: u8,
    },
    /// Innings numbers are 1 or 2.
    #[error("invalid innings number {0}")]
    InvalidInnings(u8),
    /// The request names an innings other than the one in play.
    #[error("innings {got} is not in play (current innings is {expected})")]
    InningsMismatch {
        /// Innings currently in play.
        expected: u8,
        /// Innings named by the request.
        got: u8,
    },
    /// Deliveries cannot be recorded in the current phase.
    #[error("deliveries cannot be recorded while the match is in {0:?}")]
    NotAcceptingDeliveries(MatchPhase),
    /// A required player reference is missing.
    #[error("missing {0}")]
    MissingPlayer(&'static str),
    /// The player id does not belong to either roster.
    #[error("unknown player `{0}`")]
    UnknownPlayer(Uuid),
    /// The player belongs to the wrong side for the requested role.
    #[error("player `{player}` cannot act as {role} for this innings")]
    WrongSide {
        /// Offending player.
        player: Uuid,
        /// Role the player was asked to take.
        role: &'static str,
    },
    /// The request is internally inconsistent.
    #[error("invalid delivery: {0}")]
    InvalidDelivery(String),
    /// The innings phase machine rejected the event.
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

/// Encode a legal-ball count as `overs.balls` (e.g. 27 balls → 4.3).
pub fn encode_overs(legal_balls: u32) -> f64 {
    let encoded = (legal_balls / BALLS_PER_OVER) * 10 + legal_balls % BALLS_PER_OVER;
    f64::from(encoded) / 10.0
}

/// Runs per six legal balls, rounded to two decimals; 0 when nothing was bowled.
pub fn per_over_rate(runs: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    round2(f64::from(runs) * f64::from(BALLS_PER_OVER) / f64::from(legal_balls))
}

/// Runs per hundred balls, rounded to two decimals; 0 when no ball was faced.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    round2(f64::from(runs) * 100.0 / f64::from(balls))
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
