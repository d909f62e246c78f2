//! Innings controller: the match phase machine plus the innings-level
//! operations (break, second innings, completion) and chase arithmetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::{
    matches::{Match, MatchStatus, PlayerStatus, Roster},
    scoring::{ScoringError, ScoringPolicy},
};

/// Phases a fixture moves through, strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Created, no ball bowled.
    #[default]
    PreMatch,
    /// First innings in play.
    FirstInnings,
    /// Between innings; target is known.
    InningsBreak,
    /// Second innings in play.
    SecondInnings,
    /// Result recorded.
    Completed,
}

impl MatchPhase {
    /// Public status matching the phase.
    pub fn status(self) -> MatchStatus {
        match self {
            MatchPhase::PreMatch => MatchStatus::Upcoming,
            MatchPhase::FirstInnings | MatchPhase::InningsBreak | MatchPhase::SecondInnings => {
                MatchStatus::Live
            }
            MatchPhase::Completed => MatchStatus::Completed,
        }
    }
}

/// Events accepted by the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InningsEvent {
    /// `matchStatus=live` or the first ball.
    StartMatch,
    /// `matchStatus=upcoming`; only meaningful before the first ball.
    Reschedule,
    /// `inningStatus=innings break`.
    InningsBreak,
    /// `inningStatus=second innings`.
    StartSecondInnings,
    /// `matchStatus=completed`.
    CompleteMatch,
}

/// Error returned when an event cannot be applied from the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// Phase the match was in.
    pub from: MatchPhase,
    /// Rejected event.
    pub event: InningsEvent,
}

/// Compute the phase reached by applying `event` in `from`.
pub fn compute_transition(
    from: MatchPhase,
    event: InningsEvent,
) -> Result<MatchPhase, InvalidTransition> {
    let next = match (from, event) {
        (MatchPhase::PreMatch, InningsEvent::StartMatch) => MatchPhase::FirstInnings,
        (MatchPhase::PreMatch, InningsEvent::Reschedule) => MatchPhase::PreMatch,
        (MatchPhase::FirstInnings, InningsEvent::InningsBreak) => MatchPhase::InningsBreak,
        (MatchPhase::InningsBreak, InningsEvent::StartSecondInnings) => MatchPhase::SecondInnings,
        // Re-entering resets innings 2 instead of duplicating it.
        (MatchPhase::SecondInnings, InningsEvent::StartSecondInnings) => MatchPhase::SecondInnings,
        (from, InningsEvent::CompleteMatch) if from != MatchPhase::Completed => {
            MatchPhase::Completed
        }
        (from, event) => return Err(InvalidTransition { from, event }),
    };

    Ok(next)
}

/// Batters and bowler seated when the second innings starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpeningLineup {
    /// Opening striker.
    pub striker: Option<Uuid>,
    /// Opening non-striker.
    pub non_striker: Option<Uuid>,
    /// Opening bowler.
    pub bowler: Option<Uuid>,
}

/// Chase figures during the second innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChaseState {
    /// Runs the chasing side needs in total.
    pub target: u32,
    /// Runs still required, never negative.
    pub required_runs: u32,
    /// Wickets in hand.
    pub remaining_wickets: u32,
}

impl Match {
    fn transition(&mut self, event: InningsEvent) -> Result<MatchPhase, ScoringError> {
        let next = compute_transition(self.phase, event)?;
        self.phase = next;
        self.status = next.status();
        Ok(next)
    }

    /// Move the fixture live and open the first innings.
    pub fn start_match(&mut self) -> Result<(), ScoringError> {
        self.transition(InningsEvent::StartMatch)?;
        self.current_innings = 1;
        self.ensure_innings(1)
    }

    /// Keep a fixture that has not started in the upcoming state.
    pub fn reschedule(&mut self) -> Result<(), ScoringError> {
        self.transition(InningsEvent::Reschedule).map(|_| ())
    }

    /// Close the first innings and set the target.
    pub fn begin_innings_break(&mut self, roster: &Roster) -> Result<u32, ScoringError> {
        self.transition(InningsEvent::InningsBreak)?;

        let target = self.first_innings_runs() + 1;
        self.target = Some(target);
        self.crease.clear();
        for status in self.player_statuses.values_mut() {
            if matches!(status, PlayerStatus::Batting | PlayerStatus::Bowling) {
                *status = PlayerStatus::Fielding;
            }
        }

        let chasing = roster.team_name(self.batting_team(2));
        self.commentary.push(format!(
            "Innings break: {chasing} need {target} runs to win"
        ));
        Ok(target)
    }

    /// Open (or reopen) the second innings with the given lineup.
    ///
    /// Coming straight from the first innings takes the break implicitly.
    pub fn begin_second_innings(
        &mut self,
        lineup: OpeningLineup,
        roster: &Roster,
    ) -> Result<(), ScoringError> {
        let batting = self.batting_team(2);
        let fielding = self.fielding_team(2);
        if let Some(striker) = lineup.striker {
            roster.check_side(striker, batting, "striker")?;
        }
        if let Some(non_striker) = lineup.non_striker {
            roster.check_side(non_striker, batting, "non-striker")?;
        }
        if let Some(bowler) = lineup.bowler {
            roster.check_side(bowler, fielding, "bowler")?;
        }
        if lineup.striker.is_some() && lineup.striker == lineup.non_striker {
            return Err(ScoringError::InvalidDelivery(
                "striker and non-striker must differ".into(),
            ));
        }

        if self.phase == MatchPhase::FirstInnings {
            self.begin_innings_break(roster)?;
        }
        let reentering = self.phase == MatchPhase::SecondInnings;
        self.transition(InningsEvent::StartSecondInnings)?;
        self.current_innings = 2;
        self.reset_innings(2)?;
        if self.target.is_none() {
            self.target = Some(self.first_innings_runs() + 1);
        }

        for (team_id, status) in [(batting, PlayerStatus::YetToBat), (fielding, PlayerStatus::Fielding)] {
            if let Some(team) = roster.team(team_id) {
                for player in &team.players {
                    self.set_status(player.id, status);
                }
            }
        }

        self.crease.striker = lineup.striker;
        self.crease.non_striker = lineup.non_striker;
        self.crease.bowler = lineup.bowler;
        for batter in [lineup.striker, lineup.non_striker].into_iter().flatten() {
            self.set_status(batter, PlayerStatus::Batting);
        }
        if let Some(bowler) = lineup.bowler {
            self.set_status(bowler, PlayerStatus::Bowling);
        }

        if !reentering {
            self.commentary.push(format!(
                "Second innings: {} begin the chase",
                roster.team_name(batting)
            ));
        }
        Ok(())
    }

    /// Finish the fixture and record its result.
    pub fn complete_match(
        &mut self,
        policy: &ScoringPolicy,
        roster: &Roster,
    ) -> Result<String, ScoringError> {
        self.transition(InningsEvent::CompleteMatch)?;
        self.crease.clear();
        for status in self.player_statuses.values_mut() {
            if matches!(status, PlayerStatus::Batting | PlayerStatus::Bowling) {
                *status = PlayerStatus::Fielding;
            }
        }

        let result = self.result_line(policy, roster);
        self.commentary.push(format!("Match completed: {result}"));
        self.result = Some(result.clone());
        Ok(result)
    }

    fn result_line(&self, policy: &ScoringPolicy, roster: &Roster) -> String {
        let (Some(target), Some(chase)) = (self.target, self.score(2)) else {
            return "No result".to_string();
        };

        let chasing = roster.team_name(self.batting_team(2));
        let defending = roster.team_name(self.batting_team(1));
        if chase.runs >= target {
            let margin = policy.all_out_wickets.saturating_sub(chase.wickets);
            format!("{chasing} won by {margin} {}", plural(margin, "wicket"))
        } else if chase.runs + 1 == target {
            "Match tied".to_string()
        } else {
            let margin = target - 1 - chase.runs;
            format!("{defending} won by {margin} {}", plural(margin, "run"))
        }
    }

    /// Chase figures while the second innings is on.
    pub fn chase(&self, policy: &ScoringPolicy) -> Option<ChaseState> {
        if self.phase != MatchPhase::SecondInnings {
            return None;
        }
        let target = self.target?;
        let score = self.score(2)?;
        Some(ChaseState {
            target,
            required_runs: target.saturating_sub(score.runs),
            remaining_wickets: policy.all_out_wickets.saturating_sub(score.wickets),
        })
    }

    pub(super) fn first_innings_runs(&self) -> u32 {
        self.score(1).map(|score| score.runs).unwrap_or_default()
    }
}

fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
