//! Engine error type.

use habitquest_core::{SnapshotError, ValidationError};

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned by the progression engine.
///
/// All of them are local and synchronous; a failed call leaves the engine
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No item or label with this id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected input (blank title, disallowed difficulty, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Snapshot breaks an engine invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}

impl EngineError {
    /// Whether this is a `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
