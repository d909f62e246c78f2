//! Over tracking: the in-progress over, completed overs, and legal-ball counts.

use uuid::Uuid;

use super::{Delivery, Over, ScoreState};

/// State of the over after a delivery was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverProgress {
    /// The over still needs legal deliveries.
    InProgress {
        /// Legal deliveries bowled in the over so far.
        legal_balls: u32,
    },
    /// The delivery completed the over, which moved to the history.
    Completed {
        /// Number of the completed over.
        number: u32,
        /// Whether the over was a maiden.
        maiden: bool,
        /// Bowler of the completed over.
        bowler: Option<Uuid>,
    },
}

/// A delivery taken back off the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PoppedDelivery {
    pub delivery: Delivery,
    /// Set when the delivery came from a completed over that had to be reopened.
    pub reopened: Option<ReopenedOver>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReopenedOver {
    pub number: u32,
    pub was_maiden: bool,
    pub bowler: Option<Uuid>,
}

impl ScoreState {
    /// Append a delivery to the current over, rolling over to a new one after
    /// the sixth legal ball.
    pub(crate) fn push_delivery(&mut self, delivery: Delivery) -> OverProgress {
        let legal = delivery.is_legal();
        let over = &mut self.current_over;

        if over.deliveries.is_empty() {
            over.bowler = Some(delivery.bowler);
        }
        over.runs += delivery.team_runs();
        if delivery.wicket {
            over.wickets += 1;
        }
        if legal {
            over.legal_balls += 1;
            self.legal_balls += 1;
        }
        over.deliveries.push(delivery);

        if !over.is_complete() {
            return OverProgress::InProgress {
                legal_balls: over.legal_balls,
            };
        }

        over.maiden = over.qualifies_as_maiden();
        let next = Over::new(over.number + 1);
        let finished = std::mem::replace(&mut self.current_over, next);
        let progress = OverProgress::Completed {
            number: finished.number,
            maiden: finished.maiden,
            bowler: finished.bowler,
        };
        self.over_history.push(finished);
        progress
    }

    /// Remove the most recent delivery.
    ///
    /// When the current over is empty the last completed over is reopened
    /// (the over number steps back and five legal balls remain in it).
    /// Returns `None` without touching anything when the innings is empty.
    pub(crate) fn pop_delivery(&mut self) -> Option<PoppedDelivery> {
        let mut reopened = None;

        if self.current_over.deliveries.is_empty() {
            let mut previous = self.over_history.pop()?;
            reopened = Some(ReopenedOver {
                number: previous.number,
                was_maiden: previous.maiden,
                bowler: previous.bowler,
            });
            previous.maiden = false;
            self.current_over = previous;
        }

        let over = &mut self.current_over;
        let delivery = over.deliveries.pop()?;

        over.runs = over.runs.saturating_sub(delivery.team_runs());
        if delivery.wicket {
            over.wickets = over.wickets.saturating_sub(1);
        }
        if delivery.is_legal() {
            over.legal_balls = over.legal_balls.saturating_sub(1);
            self.legal_balls = self.legal_balls.saturating_sub(1);
        }
        if over.deliveries.is_empty() {
            over.bowler = None;
        }

        Some(PoppedDelivery {
            delivery,
            reopened,
        })
    }

    /// Number of the over being bowled.
    pub fn current_over_number(&self) -> u32 {
        self.current_over.number
    }

    /// Overs completed before the current one.
    pub fn completed_overs(&self) -> u32 {
        self.over_history.len() as u32
    }

    /// Ball label (`overs.ball`) the next legal delivery will carry, e.g. `3.4`.
    pub fn next_ball_label(&self) -> String {
        format!(
            "{}.{}",
            self.completed_overs(),
            self.current_over.legal_balls + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scoring::ExtraType;

    fn dot(bowler: Uuid) -> Delivery {
        Delivery::new(Uuid::new_v4(), bowler, 0, ExtraType::None)
    }

    #[test]
    fn sixth_legal_ball_moves_the_over_to_history() {
        let mut score = ScoreState::new(1);
        let bowler = Uuid::new_v4();

        for expected in 1..=5 {
            assert_eq!(
                score.push_delivery(dot(bowler)),
                OverProgress::InProgress {
                    legal_balls: expected
                }
            );
        }
        assert_eq!(
            score.push_delivery(Delivery::new(Uuid::new_v4(), bowler, 0, ExtraType::Wide)),
            OverProgress::InProgress { legal_balls: 5 }
        );
        assert!(matches!(
            score.push_delivery(dot(bowler)),
            OverProgress::Completed { number: 1, maiden: false, .. }
        ));

        assert_eq!(score.over_history.len(), 1);
        assert_eq!(score.current_over, Over::new(2));
        assert_eq!(score.legal_balls, 6);
        assert_eq!(score.next_ball_label(), "1.1");
    }

    #[test]
    fn popping_from_an_empty_over_reopens_the_previous_one() {
        let mut score = ScoreState::new(1);
        let bowler = Uuid::new_v4();
        for _ in 0..6 {
            score.push_delivery(dot(bowler));
        }
        assert!(score.over_history[0].maiden);

        let popped = score.pop_delivery().unwrap();
        assert_eq!(
            popped.reopened,
            Some(ReopenedOver {
                number: 1,
                was_maiden: true,
                bowler: Some(bowler),
            })
        );
        assert!(score.over_history.is_empty());
        assert_eq!(score.current_over.number, 1);
        assert_eq!(score.current_over.legal_balls, 5);
        assert!(!score.current_over.maiden);
        assert_eq!(score.legal_balls, 5);
    }

    #[test]
    fn popping_an_empty_innings_changes_nothing() {
        let mut score = ScoreState::new(1);
        assert!(score.pop_delivery().is_none());
        assert_eq!(score, ScoreState::new(1));
    }
}
