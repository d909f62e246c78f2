pub mod innings;
/// Match aggregate, rosters and crease handling.
pub mod matches;
pub mod scoring;
mod sse;
/// Gate-then-broadcast helper for match mutations.
pub mod transitions;

use std::{future::Future, sync::Arc};

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock, watch};
use tokio::time::timeout;
use tracing::warn;
use uuid::Uuid;

use crate::{config::AppConfig, dao::match_store::MatchStore, error::ServiceError};

pub use self::sse::{Broadcaster, SseBroadcaster, SseHub, Topic};

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state storing persistent connections and database handles.
pub struct AppState {
    match_store: RwLock<Option<Arc<dyn MatchStore>>>,
    channels: Arc<SseBroadcaster>,
    broadcaster: Arc<dyn Broadcaster>,
    config: AppConfig,
    degraded: watch::Sender<bool>,
    match_gates: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let channels = Arc::new(SseBroadcaster::new(config.broadcast_capacity));
        let broadcaster: Arc<dyn Broadcaster> = channels.clone();
        Self::build(config, channels, broadcaster)
    }

    /// Same as [`AppState::new`] but publishing through a custom broadcaster.
    ///
    /// Subscribers of [`AppState::channels`] then receive nothing.
    pub fn with_broadcaster(config: AppConfig, broadcaster: Arc<dyn Broadcaster>) -> SharedState {
        let channels = Arc::new(SseBroadcaster::new(config.broadcast_capacity));
        Self::build(config, channels, broadcaster)
    }

    fn build(
        config: AppConfig,
        channels: Arc<SseBroadcaster>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            match_store: RwLock::new(None),
            channels,
            broadcaster,
            config,
            degraded: degraded_tx,
            match_gates: DashMap::new(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current match store, if one is installed.
    pub async fn match_store(&self) -> Option<Arc<dyn MatchStore>> {
        let guard = self.match_store.read().await;
        guard.as_ref().cloned()
    }

    /// Current match store or [`ServiceError::Degraded`].
    pub async fn require_match_store(&self) -> Result<Arc<dyn MatchStore>, ServiceError> {
        self.match_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new match store implementation and leave degraded mode.
    pub async fn install_match_store(&self, store: Arc<dyn MatchStore>) {
        {
            let mut guard = self.match_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current match store and enter degraded mode.
    pub async fn clear_match_store(&self) {
        {
            let mut guard = self.match_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.match_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Hubs SSE and WebSocket clients subscribe to.
    pub fn channels(&self) -> &SseBroadcaster {
        &self.channels
    }

    /// Capability match mutations publish through.
    pub fn broadcaster(&self) -> Arc<dyn Broadcaster> {
        self.broadcaster.clone()
    }

    /// Update and broadcast the degraded flag when the value changes.
    fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    fn gate(&self, match_id: Uuid) -> Arc<Mutex<()>> {
        self.match_gates
            .entry(match_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `work` while holding the gate of `match_id`.
    ///
    /// Mutations of one match never interleave; different matches run concurrently.
    /// The configured timeout only bounds the wait for the gate: once `work` has
    /// started it always runs to completion, so a save is never abandoned midway.
    pub async fn run_match_mutation<F, Fut, T>(
        &self,
        match_id: Uuid,
        work: F,
    ) -> Result<T, ServiceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let gate = self.gate(match_id);
        let outcome = {
            let acquired = match self.config.gate_timeout {
                Some(limit) => timeout(limit, gate.lock()).await.ok(),
                None => Some(gate.lock().await),
            };

            match acquired {
                Some(guard) => {
                    let outcome = work().await;
                    drop(guard);
                    outcome
                }
                None => {
                    warn!(match_id = %match_id, "timed out waiting for the match gate");
                    Err(ServiceError::Timeout)
                }
            }
        };

        drop(gate);
        self.release_gate(match_id);
        outcome
    }

    fn release_gate(&self, match_id: Uuid) {
        // Only this map and the lock holders keep a gate alive.
        self.match_gates
            .remove_if(&match_id, |_, gate| Arc::strong_count(gate) == 1);
    }

    #[cfg(test)]
    pub(crate) fn gate_count(&self) -> usize {
        self.match_gates.len()
    }
}
