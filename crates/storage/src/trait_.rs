//! Snapshot store trait abstraction.

use async_trait::async_trait;
use habitquest_core::EngineSnapshot;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored data decoded but is unusable
    #[error("{0}")]
    Other(String),
}

/// Durable home for engine snapshots.
///
/// The engine itself is purely in-memory; a presentation layer that wants
/// state to survive a restart saves a snapshot through one of these and
/// restores from it at start-up.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved snapshot, if any.
    async fn load(&self) -> Result<Option<EngineSnapshot>>;

    /// Replace the stored snapshot.
    async fn save(&mut self, snapshot: &EngineSnapshot) -> Result<()>;

    /// Forget the stored snapshot. Succeeds when nothing is stored.
    async fn clear(&mut self) -> Result<()>;
}
