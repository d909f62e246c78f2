use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::MatchEntity,
    dto::{score::ScoreUpdateResponse, sse::MatchUpdateEvent},
    error::ServiceError,
    services::match_service::{load_match, load_roster},
    state::{
        SharedState,
        innings::{MatchPhase, OpeningLineup},
        matches::{BallUpdate, Match, MatchStatus, Roster},
        scoring::{OverProgress, ScoringPolicy},
        transitions::run_mutation_with_broadcast,
    },
};

/// One scorer action, as selected by the `PUT /matches/{id}/score` body.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreAction {
    /// Record a delivery.
    Ball(BallUpdate),
    /// Reverse the last delivery of an innings (default 1).
    Undo {
        /// Innings to undo in.
        innings: Option<u8>,
    },
    /// Exchange striker and non-striker.
    SwapStriker,
    /// Hand the ball to another fielder.
    ChangeBowler(Uuid),
    /// Move the match to a public status.
    MatchStatus(MatchStatus),
    /// Close the first innings.
    InningsBreak,
    /// Open the second innings.
    SecondInnings(OpeningLineup),
}

impl ScoreAction {
    /// Stable name used in logs and broadcast payloads.
    pub fn name(&self) -> &'static str {
        match self {
            ScoreAction::Ball(_) => "ball_update",
            ScoreAction::Undo { .. } => "undo_last_ball",
            ScoreAction::SwapStriker => "swap_striker",
            ScoreAction::ChangeBowler(_) => "change_bowler",
            ScoreAction::MatchStatus(_) => "match_status",
            ScoreAction::InningsBreak => "innings_break",
            ScoreAction::SecondInnings(_) => "second_innings",
        }
    }
}

/// Apply a scorer action to a match, persist it, and broadcast the new state.
pub async fn update_score(
    state: &SharedState,
    match_id: Uuid,
    action: ScoreAction,
) -> Result<ScoreUpdateResponse, ServiceError> {
    let update =
        run_mutation_with_broadcast(state, match_id, || apply_and_save(state, match_id, action))
            .await?;
    Ok(update.update)
}

async fn apply_and_save(
    state: &SharedState,
    match_id: Uuid,
    action: ScoreAction,
) -> Result<MatchUpdateEvent, ServiceError> {
    let store = state.require_match_store().await?;
    let mut game = load_match(store.as_ref(), match_id).await?;
    let roster = load_roster(store.as_ref(), &game).await?;
    let policy = state.config().scoring;

    let action_name = action.name();
    let expected_version = game.version;
    let message = apply_action(&mut game, action, &roster, &policy)?;
    game.bump_version();

    let saved = store
        .update_match(MatchEntity::from(game.clone()), expected_version)
        .await?;
    if !saved {
        warn!(match_id = %match_id, expected_version, "conditional save lost a race");
        return Err(ServiceError::InvalidState(format!(
            "match `{match_id}` was modified concurrently"
        )));
    }

    info!(
        match_id = %match_id,
        action = action_name,
        version = game.version,
        "score updated"
    );

    Ok(MatchUpdateEvent {
        match_id,
        action: action_name.to_string(),
        update: ScoreUpdateResponse::new(message, &game, &roster, &policy),
    })
}

fn apply_action(
    game: &mut Match,
    action: ScoreAction,
    roster: &Roster,
    policy: &ScoringPolicy,
) -> Result<String, ServiceError> {
    let message = match action {
        ScoreAction::Ball(ball) => {
            let outcome = game.record_ball(ball, roster)?;
            let mut message = game
                .current_score()
                .and_then(|score| score.commentary.last().cloned())
                .unwrap_or_else(|| "Ball recorded".into());
            if let OverProgress::Completed { number, maiden, .. } = outcome.progress {
                message.push_str(&format!(". End of over {number}"));
                if maiden {
                    message.push_str(" (maiden)");
                }
            }
            message
        }
        ScoreAction::Undo { innings } => {
            let removed = game.undo_ball(innings)?;
            format!("Last ball removed ({})", removed.notation())
        }
        ScoreAction::SwapStriker => {
            game.swap_striker()?;
            "Striker swapped".into()
        }
        ScoreAction::ChangeBowler(bowler) => {
            game.change_bowler(bowler, roster)?;
            format!("{} is now bowling", roster.player_name(bowler))
        }
        ScoreAction::MatchStatus(MatchStatus::Upcoming) => {
            game.reschedule()?;
            "Match is upcoming".into()
        }
        ScoreAction::MatchStatus(MatchStatus::Live) => {
            game.start_match()?;
            "Match is live".into()
        }
        ScoreAction::MatchStatus(MatchStatus::Completed) => game.complete_match(policy, roster)?,
        ScoreAction::InningsBreak => {
            let target = game.begin_innings_break(roster)?;
            format!("Innings break, target {target}")
        }
        ScoreAction::SecondInnings(lineup) => {
            game.begin_second_innings(lineup, roster)?;
            "Second innings started".into()
        }
    };

    let in_play = matches!(
        game.phase,
        MatchPhase::FirstInnings | MatchPhase::SecondInnings
    );
    Ok(match game.innings_closed(policy) {
        Some(reason) if in_play => format!("{message}. Innings complete: {reason}"),
        _ => message,
    })
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use futures::future::BoxFuture;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            match_store::{MatchStore, memory::MemoryMatchStore},
            models::{MatchEntity, MatchListItemEntity, TeamEntity},
            storage::StorageResult,
        },
        dto::{matches::CreateMatchRequest, sse::ServerEvent, teams::CreateTeamRequest},
        services::{match_service, team_service},
        state::{AppState, Broadcaster, Topic, scoring::ExtraType},
    };

    #[derive(Default)]
    struct RecordingBroadcaster {
        events: Mutex<Vec<(Topic, ServerEvent)>>,
    }

    impl RecordingBroadcaster {
        fn topics(&self) -> Vec<Topic> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|(topic, _)| *topic)
                .collect()
        }

        fn clear(&self) {
            self.events.lock().unwrap().clear();
        }
    }

    impl Broadcaster for RecordingBroadcaster {
        fn publish(&self, topic: Topic, event: ServerEvent) {
            self.events.lock().unwrap().push((topic, event));
        }
    }

    struct Harness {
        state: SharedState,
        recorder: Arc<RecordingBroadcaster>,
        match_id: Uuid,
        home: Vec<Uuid>,
        away: Vec<Uuid>,
    }

    impl Harness {
        async fn new(overs_limit: u32) -> Self {
            Self::with_store(overs_limit, AppConfig::default(), Arc::new(MemoryMatchStore::new()))
                .await
        }

        async fn with_store(
            overs_limit: u32,
            config: AppConfig,
            store: Arc<dyn MatchStore>,
        ) -> Self {
            let recorder = Arc::new(RecordingBroadcaster::default());
            let state = AppState::with_broadcaster(config, recorder.clone());
            state.install_match_store(store).await;

            let squad = |prefix: &str| (1..=4).map(|n| format!("{prefix} {n}")).collect();
            let home = team_service::create_team(
                &state,
                CreateTeamRequest {
                    name: "Strikers".into(),
                    players: squad("Home"),
                },
            )
            .await
            .unwrap();
            let away = team_service::create_team(
                &state,
                CreateTeamRequest {
                    name: "Chargers".into(),
                    players: squad("Away"),
                },
            )
            .await
            .unwrap();

            let game = match_service::create_match(
                &state,
                CreateMatchRequest {
                    home_team: home.id,
                    away_team: away.id,
                    batting_first: None,
                    overs_limit,
                },
            )
            .await
            .unwrap();
            recorder.clear();

            Self {
                state,
                recorder,
                match_id: game.id,
                home: home.players.iter().map(|p| p.id).collect(),
                away: away.players.iter().map(|p| p.id).collect(),
            }
        }

        fn ball(&self, runs: u32, extra_type: ExtraType) -> ScoreAction {
            ScoreAction::Ball(BallUpdate {
                runs,
                extra_type,
                striker: Some(self.home[0]),
                non_striker: Some(self.home[1]),
                bowler: Some(self.away[0]),
                ..BallUpdate::default()
            })
        }

        async fn send(&self, action: ScoreAction) -> Result<ScoreUpdateResponse, ServiceError> {
            update_score(&self.state, self.match_id, action).await
        }
    }

    /// Commits immediately but acknowledges the save late.
    struct SlowAckStore {
        inner: MemoryMatchStore,
        delay: Duration,
    }

    impl MatchStore for SlowAckStore {
        fn insert_match(&self, game: MatchEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.insert_match(game)
        }

        fn update_match(
            &self,
            game: MatchEntity,
            expected_version: u64,
        ) -> BoxFuture<'static, StorageResult<bool>> {
            let committed = self.inner.update_match(game, expected_version);
            let delay = self.delay;
            Box::pin(async move {
                let saved = committed.await;
                tokio::time::sleep(delay).await;
                saved
            })
        }

        fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
            self.inner.find_match(id)
        }

        fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchListItemEntity>>> {
            self.inner.list_matches()
        }

        fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.save_team(team)
        }

        fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
            self.inner.find_team(id)
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.health_check()
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.try_reconnect()
        }
    }

    #[tokio::test]
    async fn slow_save_is_reported_and_broadcast_once_committed() {
        let config = AppConfig {
            gate_timeout: Some(Duration::from_millis(20)),
            ..AppConfig::default()
        };
        let store = Arc::new(SlowAckStore {
            inner: MemoryMatchStore::new(),
            delay: Duration::from_millis(100),
        });
        let h = Harness::with_store(2, config, store).await;

        let response = h.send(h.ball(4, ExtraType::None)).await.unwrap();
        assert_eq!(response.game.version, 1);
        assert_eq!(
            h.recorder.topics(),
            vec![Topic::Global, Topic::Match(h.match_id)]
        );

        let stored = match_service::get_match(&h.state, h.match_id).await.unwrap();
        assert_eq!((stored.version, stored.scores[0].runs), (1, 4));
    }

    #[tokio::test]
    async fn ball_update_is_saved_and_broadcast_on_both_topics() {
        let h = Harness::new(2).await;

        let response = h.send(h.ball(4, ExtraType::None)).await.unwrap();

        assert!(response.success);
        assert_eq!(response.game.version, 1);
        assert_eq!(response.game.scores[0].runs, 4);
        assert_eq!(response.striker.as_ref().unwrap().fours, 1);
        assert_eq!(
            h.recorder.topics(),
            vec![Topic::Global, Topic::Match(h.match_id)]
        );

        let stored = match_service::get_match(&h.state, h.match_id).await.unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.status, MatchStatus::Live);
    }

    #[tokio::test]
    async fn rejected_action_changes_nothing_and_broadcasts_nothing() {
        let h = Harness::new(2).await;

        let err = h.send(ScoreAction::Undo { innings: None }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));

        let wrong_side = ScoreAction::Ball(BallUpdate {
            striker: Some(h.away[1]),
            bowler: Some(h.away[0]),
            ..BallUpdate::default()
        });
        let err = h.send(wrong_side).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        assert!(h.recorder.topics().is_empty());
        let stored = match_service::get_match(&h.state, h.match_id).await.unwrap();
        assert_eq!(stored.version, 0);
    }

    #[tokio::test]
    async fn unknown_match_is_not_found() {
        let h = Harness::new(2).await;
        let err = update_score(&h.state, Uuid::new_v4(), ScoreAction::SwapStriker)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn degraded_mode_rejects_updates() {
        let h = Harness::new(2).await;
        h.state.clear_match_store().await;
        let err = h.send(h.ball(1, ExtraType::None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Degraded));
    }

    #[tokio::test]
    async fn completing_the_last_over_reports_innings_complete() {
        let h = Harness::new(1).await;
        let mut last = None;
        for _ in 0..6 {
            last = Some(h.send(h.ball(0, ExtraType::None)).await.unwrap());
        }
        let message = last.unwrap().message;
        assert!(message.contains("End of over 1 (maiden)"), "{message}");
        assert!(message.ends_with("Innings complete: overs completed"), "{message}");
    }

    #[tokio::test]
    async fn full_match_flow_reports_chase_and_result() {
        let h = Harness::new(1).await;
        h.send(h.ball(6, ExtraType::None)).await.unwrap();

        let response = h.send(ScoreAction::InningsBreak).await.unwrap();
        assert_eq!(response.message, "Innings break, target 7");

        let response = h
            .send(ScoreAction::SecondInnings(OpeningLineup {
                striker: Some(h.away[0]),
                non_striker: Some(h.away[1]),
                bowler: Some(h.home[0]),
            }))
            .await
            .unwrap();
        assert_eq!(response.target, Some(7));
        assert_eq!(response.required_runs, Some(7));
        assert_eq!(response.remaining_wickets, Some(10));

        let chase_ball = ScoreAction::Ball(BallUpdate {
            runs: 4,
            striker: Some(h.away[0]),
            non_striker: Some(h.away[1]),
            bowler: Some(h.home[0]),
            innings: Some(2),
            ..BallUpdate::default()
        });
        let response = h.send(chase_ball).await.unwrap();
        assert_eq!(response.required_runs, Some(3));

        let err = h.send(ScoreAction::Undo { innings: None }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));

        let response = h
            .send(ScoreAction::MatchStatus(MatchStatus::Completed))
            .await
            .unwrap();
        assert_eq!(response.message, "Strikers won by 2 runs");
        assert_eq!(response.game.status, MatchStatus::Completed);
        assert_eq!(
            (response.target, response.required_runs, response.remaining_wickets),
            (None, None, None)
        );

        let err = h.send(h.ball(1, ExtraType::None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn concurrent_updates_of_one_match_all_apply() {
        let h = Harness::new(5).await;
        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let state = h.state.clone();
                let action = h.ball(1, ExtraType::None);
                let match_id = h.match_id;
                tokio::spawn(async move { update_score(&state, match_id, action).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = match_service::get_match(&h.state, h.match_id).await.unwrap();
        assert_eq!(stored.version, 6);
        assert_eq!(stored.scores[0].runs, 6);
        assert_eq!(stored.scores[0].overs, 1.0);
    }

    #[tokio::test]
    async fn scoreboard_resolves_names() {
        let h = Harness::new(2).await;
        h.send(h.ball(2, ExtraType::None)).await.unwrap();

        let board = match_service::scoreboard(&h.state, h.match_id).await.unwrap();
        assert_eq!(board.innings.len(), 1);
        assert_eq!(board.innings[0].batting[0].name, "Home 1");
        assert_eq!(board.innings[0].bowling[0].name, "Away 1");
    }
}
