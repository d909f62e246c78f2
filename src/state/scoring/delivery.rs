//! Delivery processor: applies one ball to an innings.

use super::{Delivery, ExtraType, OverProgress, PlayerStatLedger, ScoreState};

/// Batting figures contributed by a single delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BattingDelta {
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
}

impl BattingDelta {
    pub fn of(delivery: &Delivery) -> Self {
        let runs = delivery.batter_runs();
        let scored_off_bat = matches!(delivery.extra_type, ExtraType::None | ExtraType::NoBall);
        Self {
            runs,
            balls: u32::from(delivery.counts_as_ball_faced()),
            fours: u32::from(scored_off_bat && runs == 4),
            sixes: u32::from(scored_off_bat && runs == 6),
        }
    }
}

/// Bowling figures contributed by a single delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BowlingDelta {
    pub balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub wides: u32,
    pub noballs: u32,
    pub byes: u32,
    pub legbyes: u32,
}

impl BowlingDelta {
    pub fn of(delivery: &Delivery) -> Self {
        let mut delta = Self {
            balls: u32::from(delivery.is_legal()),
            runs_conceded: delivery.team_runs(),
            wickets: u32::from(delivery.bowler_wicket()),
            ..Self::default()
        };

        match delivery.extra_type {
            ExtraType::None => {}
            ExtraType::Wide => delta.wides = delivery.team_runs(),
            ExtraType::NoBall => delta.noballs = 1,
            ExtraType::Bye => delta.byes = delivery.runs,
            ExtraType::LegBye => delta.legbyes = delivery.runs,
        }

        delta
    }
}

/// What a single delivery did to the innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Runs added to the team total.
    pub team_runs: u32,
    /// Whether the ball counted toward the over.
    pub legal: bool,
    /// Whether a wicket fell.
    pub wicket: bool,
    /// Whether the bowler was credited with the wicket.
    pub bowler_wicket: bool,
    /// Over state after the delivery.
    pub progress: OverProgress,
}

/// Apply one delivery to the innings score and its player ledger.
///
/// The delivery's `sequence` and `opened_entries` are filled in here; every
/// other field is taken as given. All figures are computed from the record
/// alone so [`super::undo_last_delivery`] can subtract exactly the same deltas.
pub fn apply_delivery(
    score: &mut ScoreState,
    ledger: &mut PlayerStatLedger,
    mut delivery: Delivery,
) -> DeliveryOutcome {
    delivery.sequence = score.current_over.legal_balls + 1;
    delivery.opened_entries = ledger.record(&delivery);

    let team_runs = delivery.team_runs();
    let legal = delivery.is_legal();
    let wicket = delivery.wicket;
    let bowler_wicket = delivery.bowler_wicket();

    score.runs += team_runs;
    if wicket {
        score.wickets += 1;
    }
    if !delivery.commentary.is_empty() {
        score.commentary.push(delivery.commentary.clone());
    }

    let progress = score.push_delivery(delivery);
    if let OverProgress::Completed {
        maiden: true,
        bowler: Some(bowler),
        ..
    } = progress
    {
        ledger.credit_maiden(bowler);
    }

    score.refresh_derived();

    DeliveryOutcome {
        team_runs,
        legal,
        wicket,
        bowler_wicket,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::state::scoring::{DismissalType, replay_ledger};

    struct Fixture {
        score: ScoreState,
        ledger: PlayerStatLedger,
        striker: Uuid,
        non_striker: Uuid,
        bowler: Uuid,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                score: ScoreState::new(1),
                ledger: PlayerStatLedger::new(1),
                striker: Uuid::new_v4(),
                non_striker: Uuid::new_v4(),
                bowler: Uuid::new_v4(),
            }
        }

        fn ball(&self, runs: u32, extra_type: ExtraType) -> Delivery {
            Delivery::new(self.striker, self.bowler, runs, extra_type)
                .with_non_striker(Some(self.non_striker))
        }

        fn apply(&mut self, delivery: Delivery) -> DeliveryOutcome {
            let outcome = apply_delivery(&mut self.score, &mut self.ledger, delivery);
            assert_eq!(replay_ledger(&self.score), self.ledger);
            outcome
        }
    }

    #[test]
    fn six_singles_complete_the_first_over() {
        let mut fx = Fixture::new();
        for _ in 0..6 {
            let ball = fx.ball(1, ExtraType::None);
            fx.apply(ball);
        }

        assert_eq!(fx.score.runs, 6);
        assert_eq!(fx.score.overs, 1.0);
        assert_eq!(fx.score.run_rate, 6.0);
        assert_eq!(fx.score.over_history.len(), 1);
        assert_eq!(fx.score.over_history[0].legal_balls, 6);
        assert_eq!(fx.score.current_over.number, 2);
        assert!(fx.score.current_over.deliveries.is_empty());

        let striker = fx.ledger.get(fx.striker).unwrap();
        assert_eq!(striker.runs, 6);
        assert_eq!(striker.balls_faced, 6);
        assert_eq!(striker.strike_rate, 100.0);

        let bowler = fx.ledger.get(fx.bowler).unwrap();
        assert_eq!(bowler.balls_bowled, 6);
        assert_eq!(bowler.overs, 1.0);
        assert_eq!(bowler.runs_conceded, 6);
        assert_eq!(bowler.economy, 6.0);
        assert_eq!(bowler.maidens, 0);
    }

    #[test]
    fn wide_adds_a_penalty_run_without_touching_the_striker() {
        let mut fx = Fixture::new();
        let ball = fx.ball(0, ExtraType::Wide);
        let outcome = fx.apply(ball);

        assert!(!outcome.legal);
        assert_eq!(fx.score.runs, 1);
        assert_eq!(fx.score.legal_balls, 0);
        assert_eq!(fx.score.current_over.legal_balls, 0);

        let striker = fx.ledger.get(fx.striker).unwrap();
        assert_eq!(striker.runs, 0);
        assert_eq!(striker.balls_faced, 0);

        let bowler = fx.ledger.get(fx.bowler).unwrap();
        assert_eq!(bowler.runs_conceded, 1);
        assert_eq!(bowler.wides, 1);
        assert_eq!(bowler.balls_bowled, 0);
    }

    #[test]
    fn boundary_off_a_no_ball_counts_for_the_striker() {
        let mut fx = Fixture::new();
        let ball = fx.ball(4, ExtraType::NoBall);
        fx.apply(ball);

        assert_eq!(fx.score.runs, 5);
        assert_eq!(fx.score.legal_balls, 0);

        let striker = fx.ledger.get(fx.striker).unwrap();
        assert_eq!(striker.runs, 4);
        assert_eq!(striker.fours, 1);
        assert_eq!(striker.balls_faced, 0);

        let bowler = fx.ledger.get(fx.bowler).unwrap();
        assert_eq!(bowler.runs_conceded, 5);
        assert_eq!(bowler.noballs, 1);
    }

    #[test]
    fn byes_and_leg_byes_go_to_the_team_only() {
        let mut fx = Fixture::new();
        let bye = fx.ball(2, ExtraType::Bye);
        fx.apply(bye);
        let leg_bye = fx.ball(4, ExtraType::LegBye);
        fx.apply(leg_bye);

        assert_eq!(fx.score.runs, 6);
        assert_eq!(fx.score.legal_balls, 2);

        let striker = fx.ledger.get(fx.striker).unwrap();
        assert_eq!(striker.runs, 0);
        assert_eq!(striker.fours, 0);
        assert_eq!(striker.balls_faced, 2);

        let bowler = fx.ledger.get(fx.bowler).unwrap();
        assert_eq!(bowler.runs_conceded, 6);
        assert_eq!(bowler.byes, 2);
        assert_eq!(bowler.legbyes, 4);
    }

    #[test]
    fn run_out_marks_the_striker_without_crediting_the_bowler() {
        let mut fx = Fixture::new();
        let ball = fx
            .ball(1, ExtraType::None)
            .with_wicket(Some(DismissalType::RunOut), None);
        let outcome = fx.apply(ball);

        assert!(outcome.wicket);
        assert!(!outcome.bowler_wicket);
        assert_eq!(fx.score.wickets, 1);
        assert_eq!(fx.score.current_over.wickets, 1);

        let striker = fx.ledger.get(fx.striker).unwrap();
        assert!(striker.is_out);
        assert_eq!(striker.dismissal.as_deref(), Some("run out"));
        assert_eq!(fx.ledger.get(fx.bowler).unwrap().wickets, 0);
    }

    #[test]
    fn caught_credits_the_bowler_and_seats_the_replacement() {
        let mut fx = Fixture::new();
        let replacement = Uuid::new_v4();
        let ball = fx
            .ball(0, ExtraType::None)
            .with_wicket(Some(DismissalType::Caught), Some(replacement));
        fx.apply(ball);

        assert_eq!(fx.ledger.get(fx.bowler).unwrap().wickets, 1);
        let fresh = fx.ledger.get(replacement).unwrap();
        assert_eq!((fresh.runs, fresh.balls_faced, fresh.is_out), (0, 0, false));
    }

    #[test]
    fn illegal_deliveries_do_not_consume_an_over_slot() {
        let mut fx = Fixture::new();
        for extra in [ExtraType::Wide, ExtraType::NoBall] {
            let ball = fx.ball(0, extra);
            fx.apply(ball);
        }
        for _ in 0..5 {
            let ball = fx.ball(0, ExtraType::None);
            fx.apply(ball);
        }

        assert_eq!(fx.score.current_over.deliveries.len(), 7);
        assert_eq!(fx.score.current_over.legal_balls, 5);
        assert_eq!(fx.score.overs, 0.5);
        assert!(fx.score.over_history.is_empty());

        let ball = fx.ball(0, ExtraType::None);
        let outcome = fx.apply(ball);
        assert_eq!(
            outcome.progress,
            OverProgress::Completed {
                number: 1,
                maiden: false,
                bowler: Some(fx.bowler),
            }
        );
        let sequences: Vec<u32> = fx.score.over_history[0]
            .deliveries
            .iter()
            .map(|delivery| delivery.sequence)
            .collect();
        assert_eq!(sequences, vec![1, 1, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn six_dot_balls_are_a_maiden() {
        let mut fx = Fixture::new();
        for _ in 0..6 {
            let ball = fx.ball(0, ExtraType::None);
            fx.apply(ball);
        }

        assert!(fx.score.over_history[0].maiden);
        assert_eq!(fx.ledger.get(fx.bowler).unwrap().maidens, 1);
    }

    #[test]
    fn team_runs_always_equal_the_sum_of_contributions() {
        let mut fx = Fixture::new();
        let script = [
            (1, ExtraType::None),
            (0, ExtraType::Wide),
            (2, ExtraType::Wide),
            (6, ExtraType::NoBall),
            (3, ExtraType::Bye),
            (1, ExtraType::LegBye),
            (4, ExtraType::None),
            (0, ExtraType::None),
            (6, ExtraType::None),
        ];
        for (runs, extra) in script {
            let ball = fx.ball(runs, extra);
            fx.apply(ball);
        }

        let expected: u32 = fx.score.deliveries().map(Delivery::team_runs).sum();
        assert_eq!(fx.score.runs, expected);
        assert_eq!(fx.score.runs, 1 + 1 + 3 + 7 + 3 + 1 + 4 + 0 + 6);
    }
}
