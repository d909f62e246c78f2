//! Per-innings player ledger and its replay projection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    Delivery, ScoreState, encode_overs, per_over_rate,
    delivery::{BattingDelta, BowlingDelta},
    strike_rate,
};

/// One player's batting and bowling figures for one innings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Player the figures belong to.
    pub player_id: Uuid,
    /// Runs scored off the bat.
    pub runs: u32,
    /// Legal deliveries faced.
    pub balls_faced: u32,
    /// Boundaries for four.
    pub fours: u32,
    /// Boundaries for six.
    pub sixes: u32,
    /// Runs per hundred balls faced.
    pub strike_rate: f64,
    /// Whether the batter has been dismissed.
    pub is_out: bool,
    /// How the batter was dismissed.
    pub dismissal: Option<String>,
    /// Legal deliveries bowled.
    pub balls_bowled: u32,
    /// Overs bowled in `overs.balls` notation.
    pub overs: f64,
    /// Runs conceded, extras included.
    pub runs_conceded: u32,
    /// Wickets credited to the bowler.
    pub wickets: u32,
    /// Maiden overs bowled.
    pub maidens: u32,
    /// Runs conceded in wides, penalty included.
    pub wides: u32,
    /// No-balls bowled.
    pub noballs: u32,
    /// Byes conceded.
    pub byes: u32,
    /// Leg byes conceded.
    pub legbyes: u32,
    /// Runs conceded per over.
    pub economy: f64,
}

impl PlayerStats {
    /// Zeroed entry for a player.
    pub fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            ..Self::default()
        }
    }

    /// Whether the player has faced or scored nothing.
    pub fn has_not_batted(&self) -> bool {
        self.runs == 0 && self.balls_faced == 0
    }

    /// Whether the entry carries no figures at all.
    fn is_blank(&self) -> bool {
        self.has_not_batted()
            && !self.is_out
            && self.balls_bowled == 0
            && self.runs_conceded == 0
            && self.maidens == 0
    }

    /// Extras conceded while bowling.
    pub fn extras_conceded(&self) -> u32 {
        self.wides + self.noballs + self.byes + self.legbyes
    }

    fn add_batting(&mut self, delta: BattingDelta) {
        self.runs += delta.runs;
        self.balls_faced += delta.balls;
        self.fours += delta.fours;
        self.sixes += delta.sixes;
    }

    fn sub_batting(&mut self, delta: BattingDelta) {
        self.runs = self.runs.saturating_sub(delta.runs);
        self.balls_faced = self.balls_faced.saturating_sub(delta.balls);
        self.fours = self.fours.saturating_sub(delta.fours);
        self.sixes = self.sixes.saturating_sub(delta.sixes);
    }

    fn add_bowling(&mut self, delta: BowlingDelta) {
        self.balls_bowled += delta.balls;
        self.runs_conceded += delta.runs_conceded;
        self.wickets += delta.wickets;
        self.wides += delta.wides;
        self.noballs += delta.noballs;
        self.byes += delta.byes;
        self.legbyes += delta.legbyes;
    }

    fn sub_bowling(&mut self, delta: BowlingDelta) {
        self.balls_bowled = self.balls_bowled.saturating_sub(delta.balls);
        self.runs_conceded = self.runs_conceded.saturating_sub(delta.runs_conceded);
        self.wickets = self.wickets.saturating_sub(delta.wickets);
        self.wides = self.wides.saturating_sub(delta.wides);
        self.noballs = self.noballs.saturating_sub(delta.noballs);
        self.byes = self.byes.saturating_sub(delta.byes);
        self.legbyes = self.legbyes.saturating_sub(delta.legbyes);
    }

    fn refresh_derived(&mut self) {
        self.strike_rate = strike_rate(self.runs, self.balls_faced);
        self.overs = encode_overs(self.balls_bowled);
        self.economy = per_over_rate(self.runs_conceded, self.balls_bowled);
    }
}

/// All player entries for one innings, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatLedger {
    /// Innings number (1 or 2).
    pub innings: u8,
    /// Player entries.
    pub players: Vec<PlayerStats>,
}

impl PlayerStatLedger {
    /// Empty ledger for an innings.
    pub fn new(innings: u8) -> Self {
        Self {
            innings,
            players: Vec::new(),
        }
    }

    /// Look up a player's entry.
    pub fn get(&self, player_id: Uuid) -> Option<&PlayerStats> {
        self.players
            .iter()
            .find(|entry| entry.player_id == player_id)
    }

    fn get_mut(&mut self, player_id: Uuid) -> Option<&mut PlayerStats> {
        self.players
            .iter_mut()
            .find(|entry| entry.player_id == player_id)
    }

    /// Entry for the player, creating a zeroed one when missing.
    fn entry(&mut self, player_id: Uuid) -> &mut PlayerStats {
        let index = match self
            .players
            .iter()
            .position(|entry| entry.player_id == player_id)
        {
            Some(index) => index,
            None => {
                self.players.push(PlayerStats::new(player_id));
                self.players.len() - 1
            }
        };
        &mut self.players[index]
    }

    fn remove(&mut self, player_id: Uuid) {
        self.players.retain(|entry| entry.player_id != player_id);
    }

    /// Credit one delivery, returning the entries it had to open.
    pub(crate) fn record(&mut self, delivery: &Delivery) -> Vec<Uuid> {
        let mut opened = Vec::new();
        for player_id in delivery.participants() {
            if self.get(player_id).is_none() {
                self.players.push(PlayerStats::new(player_id));
                opened.push(player_id);
            }
        }

        let striker = self.entry(delivery.striker);
        striker.add_batting(BattingDelta::of(delivery));
        if delivery.wicket {
            striker.is_out = true;
            striker.dismissal = Some(
                delivery
                    .dismissal_type
                    .map(|dismissal| dismissal.label())
                    .unwrap_or("out")
                    .to_string(),
            );
        }
        striker.refresh_derived();

        let bowler = self.entry(delivery.bowler);
        bowler.add_bowling(BowlingDelta::of(delivery));
        bowler.refresh_derived();

        opened
    }

    /// Subtract one delivery previously passed to [`Self::record`].
    ///
    /// Entries the delivery opened are dropped again; a replacement batter is
    /// only dropped while they still have no runs and no balls.
    pub(crate) fn revert(&mut self, delivery: &Delivery) {
        if let Some(striker) = self.get_mut(delivery.striker) {
            striker.sub_batting(BattingDelta::of(delivery));
            if delivery.wicket {
                striker.is_out = false;
                striker.dismissal = None;
            }
            striker.refresh_derived();
        }

        if let Some(bowler) = self.get_mut(delivery.bowler) {
            bowler.sub_bowling(BowlingDelta::of(delivery));
            bowler.refresh_derived();
        }

        for player_id in &delivery.opened_entries {
            let removable = match self.get(*player_id) {
                Some(entry) if delivery.new_batsman == Some(*player_id) => entry.has_not_batted(),
                Some(entry) => entry.is_blank(),
                None => false,
            };
            if removable {
                self.remove(*player_id);
            }
        }
    }

    pub(crate) fn credit_maiden(&mut self, bowler: Uuid) {
        self.entry(bowler).maidens += 1;
    }

    pub(crate) fn revoke_maiden(&mut self, bowler: Uuid) {
        if let Some(entry) = self.get_mut(bowler) {
            entry.maidens = entry.maidens.saturating_sub(1);
        }
    }
}

/// Rebuild an innings ledger by replaying every recorded delivery.
pub fn replay_ledger(score: &ScoreState) -> PlayerStatLedger {
    let mut ledger = PlayerStatLedger::new(score.innings);

    for over in &score.over_history {
        for delivery in &over.deliveries {
            ledger.record(delivery);
        }
        if over.qualifies_as_maiden() {
            if let Some(bowler) = over.bowler {
                ledger.credit_maiden(bowler);
            }
        }
    }

    for delivery in &score.current_over.deliveries {
        ledger.record(delivery);
    }

    ledger
}

/// Replay a single player's figures for the innings.
pub fn replay_player(score: &ScoreState, player_id: Uuid) -> PlayerStats {
    replay_ledger(score)
        .get(player_id)
        .cloned()
        .unwrap_or_else(|| PlayerStats::new(player_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scoring::{DismissalType, ExtraType, apply_delivery};

    #[test]
    fn replay_of_an_untouched_player_is_zeroed() {
        let score = ScoreState::new(1);
        let player = Uuid::new_v4();
        assert_eq!(replay_player(&score, player), PlayerStats::new(player));
    }

    #[test]
    fn replay_matches_the_incremental_figures() {
        let mut score = ScoreState::new(2);
        let mut ledger = PlayerStatLedger::new(2);
        let (opener, partner, bowler, change) = (
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );

        for _ in 0..6 {
            let ball = Delivery::new(opener, bowler, 0, ExtraType::None)
                .with_non_striker(Some(partner));
            apply_delivery(&mut score, &mut ledger, ball);
        }
        for (runs, extra) in [(4, ExtraType::None), (1, ExtraType::Wide), (2, ExtraType::Bye)] {
            let ball =
                Delivery::new(partner, change, runs, extra).with_non_striker(Some(opener));
            apply_delivery(&mut score, &mut ledger, ball);
        }
        let wicket = Delivery::new(partner, change, 0, ExtraType::None)
            .with_non_striker(Some(opener))
            .with_wicket(Some(DismissalType::Lbw), None);
        apply_delivery(&mut score, &mut ledger, wicket);

        assert_eq!(replay_ledger(&score), ledger);

        let partner_figures = replay_player(&score, partner);
        assert_eq!(partner_figures.runs, 4);
        assert_eq!(partner_figures.balls_faced, 3);
        assert!(partner_figures.is_out);
        assert_eq!(partner_figures.dismissal.as_deref(), Some("lbw"));

        let opening_bowler = replay_player(&score, bowler);
        assert_eq!(opening_bowler.maidens, 1);
        assert_eq!(opening_bowler.economy, 0.0);

        let change_bowler = replay_player(&score, change);
        assert_eq!(change_bowler.runs_conceded, 8);
        assert_eq!(change_bowler.wickets, 1);
        assert_eq!(change_bowler.extras_conceded(), 4);
        assert_eq!(change_bowler.overs, 0.3);
        assert_eq!(change_bowler.economy, 16.0);
    }
}
