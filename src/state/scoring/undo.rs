//! Undo engine: reverses the most recent delivery of an innings.

use super::{Delivery, PlayerStatLedger, ScoreState, ScoringError};

/// Remove the last recorded delivery and subtract everything it contributed.
///
/// Returns the removed delivery so the caller can restore the crease. Fails
/// with [`ScoringError::NothingToUndo`] and leaves both structures untouched
/// when the innings holds no delivery.
pub fn undo_last_delivery(
    score: &mut ScoreState,
    ledger: &mut PlayerStatLedger,
) -> Result<Delivery, ScoringError> {
    let popped = score
        .pop_delivery()
        .ok_or(ScoringError::NothingToUndo {
            innings: score.innings,
        })?;

    if let Some(reopened) = popped.reopened {
        if let (true, Some(bowler)) = (reopened.was_maiden, reopened.bowler) {
            ledger.revoke_maiden(bowler);
        }
    }

    let delivery = popped.delivery;
    ledger.revert(&delivery);

    score.runs = score.runs.saturating_sub(delivery.team_runs());
    if delivery.wicket {
        score.wickets = score.wickets.saturating_sub(1);
    }
    if !delivery.commentary.is_empty() {
        score.commentary.pop();
    }
    score.refresh_derived();

    Ok(delivery)
}
