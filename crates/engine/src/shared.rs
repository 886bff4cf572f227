//! Mutex-guarded engine handle for concurrent callers.

use std::sync::Arc;
use habitquest_core::{
    EngineSnapshot, ItemId, ItemKind, ItemUpdate, NewItem, ProgressionStats, TrackableItem,
};
use tokio::sync::{Mutex, MutexGuard};
use crate::engine::{ProgressionEngine, ToggleOutcome};
use crate::error::Result;

/// Cloneable handle that serializes every operation on one engine.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ProgressionEngine>>,
}

impl SharedEngine {
    /// Wrap an engine.
    pub fn new(engine: ProgressionEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Lock the engine for several operations in a row.
    pub async fn lock(&self) -> MutexGuard<'_, ProgressionEngine> {
        self.inner.lock().await
    }

    /// See [`ProgressionEngine::create_item`].
    pub async fn create_item(&self, request: NewItem) -> Result<TrackableItem> {
        self.inner.lock().await.create_item(request)
    }

    /// See [`ProgressionEngine::update_item`].
    pub async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<TrackableItem> {
        self.inner.lock().await.update_item(id, update)
    }

    /// See [`ProgressionEngine::delete_item`].
    pub async fn delete_item(&self, id: ItemId) -> Option<TrackableItem> {
        self.inner.lock().await.delete_item(id)
    }

    /// See [`ProgressionEngine::toggle_completion`].
    pub async fn toggle_completion(&self, id: ItemId) -> Result<ToggleOutcome> {
        self.inner.lock().await.toggle_completion(id)
    }

    /// See [`ProgressionEngine::list_items`].
    pub async fn list_items(&self, kind: Option<ItemKind>) -> Vec<TrackableItem> {
        self.inner.lock().await.list_items(kind)
    }

    /// See [`ProgressionEngine::get_stats`].
    pub async fn get_stats(&self) -> ProgressionStats {
        self.inner.lock().await.get_stats()
    }

    /// See [`ProgressionEngine::snapshot`].
    pub async fn snapshot(&self) -> EngineSnapshot {
        self.inner.lock().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitquest_core::Difficulty;

    #[tokio::test]
    async fn concurrent_toggles_lose_no_rewards() {
        let shared = SharedEngine::new(ProgressionEngine::new());
        let mut ids = Vec::new();
        for i in 0..20 {
            let item = shared
                .create_item(NewItem::todo(format!("task {i}")).with_difficulty(Difficulty::Trivial))
                .await
                .unwrap();
            ids.push(item.id);
        }

        let handles: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let shared = shared.clone();
                tokio::spawn(async move { shared.toggle_completion(id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stats = shared.get_stats().await;
        // 20 trivial completions: 100 exp, 20 gold
        assert_eq!(stats.level, 2);
        assert_eq!(stats.experience, 0);
        assert_eq!(stats.gold, 20);
    }

    #[tokio::test]
    async fn lock_allows_batched_operations() {
        let shared = SharedEngine::new(ProgressionEngine::new());
        {
            let mut engine = shared.lock().await;
            let item = engine.create_item(NewItem::daily("a")).unwrap();
            engine.toggle_completion(item.id).unwrap();
        }
        assert_eq!(shared.list_items(Some(ItemKind::Daily)).await.len(), 1);
        assert_eq!(shared.snapshot().await.stats.gold, 3);
    }
}
