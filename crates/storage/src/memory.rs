//! In-memory snapshot store, for tests and embedders without a disk.

use habitquest_core::EngineSnapshot;
use super::{Result, SnapshotStore};

/// Holds at most one snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotStore {
    snapshot: Option<EngineSnapshot>,
    saves: u64,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> u64 {
        self.saves
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<EngineSnapshot>> {
        Ok(self.snapshot.clone())
    }

    async fn save(&mut self, snapshot: &EngineSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }
}
