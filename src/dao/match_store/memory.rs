use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use futures::future::{self, BoxFuture};
use uuid::Uuid;

use crate::dao::{
    match_store::MatchStore,
    models::{MatchEntity, MatchListItemEntity, TeamEntity},
    storage::StorageResult,
};

/// Store keeping every document in memory; used by tests and `STORAGE_BACKEND=memory`.
#[derive(Clone, Default)]
pub struct MemoryMatchStore {
    matches: Arc<DashMap<Uuid, MatchEntity>>,
    teams: Arc<DashMap<Uuid, TeamEntity>>,
}

impl MemoryMatchStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for MemoryMatchStore {
    fn insert_match(&self, game: MatchEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.matches.insert(game.id, game);
        Box::pin(future::ready(Ok(())))
    }

    fn update_match(
        &self,
        game: MatchEntity,
        expected_version: u64,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let stored = match self.matches.entry(game.id) {
            Entry::Occupied(mut entry) if entry.get().version == expected_version => {
                entry.insert(game);
                true
            }
            Entry::Occupied(_) | Entry::Vacant(_) => false,
        };
        Box::pin(future::ready(Ok(stored)))
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let found = self.matches.get(&id).map(|entry| entry.value().clone());
        Box::pin(future::ready(Ok(found)))
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchListItemEntity>>> {
        let mut items: Vec<MatchListItemEntity> = self
            .matches
            .iter()
            .map(|entry| MatchListItemEntity::from(entry.value()))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Box::pin(future::ready(Ok(items)))
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.teams.insert(team.id, team);
        Box::pin(future::ready(Ok(())))
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let found = self.teams.get(&id).map(|entry| entry.value().clone());
        Box::pin(future::ready(Ok(found)))
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(future::ready(Ok(())))
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(future::ready(Ok(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::matches::{Match, Team};

    fn sample() -> MatchEntity {
        let home = Team::new("Home".into(), vec!["A".into()]);
        let away = Team::new("Away".into(), vec!["B".into()]);
        Match::new(&home, &away, home.id, 5).into()
    }

    #[tokio::test]
    async fn update_is_rejected_on_a_stale_version() {
        let store = MemoryMatchStore::new();
        let game = sample();
        store.insert_match(game.clone()).await.unwrap();

        let mut next = game.clone();
        next.version = 1;
        assert!(store.update_match(next.clone(), 0).await.unwrap());

        let mut stale = game;
        stale.version = 1;
        stale.overs_limit = 20;
        assert!(!store.update_match(stale, 0).await.unwrap());

        let stored = store.find_match(next.id).await.unwrap().unwrap();
        assert_eq!(stored, next);
    }

    #[tokio::test]
    async fn update_of_an_unknown_match_stores_nothing() {
        let store = MemoryMatchStore::new();
        let game = sample();
        assert!(!store.update_match(game.clone(), 0).await.unwrap());
        assert!(store.find_match(game.id).await.unwrap().is_none());
    }
}
