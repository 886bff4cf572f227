//! Validation failures raised by the domain model.

use crate::{Difficulty, ItemKind};

/// Input that the domain model refuses to accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Item title is empty or whitespace only
    #[error("title must not be blank")]
    BlankTitle,

    /// Label name is empty or whitespace only
    #[error("label name must not be blank")]
    BlankLabelName,

    /// The kind policy does not allow this difficulty
    #[error("{difficulty} difficulty is not allowed for {kind} items")]
    DifficultyNotAllowed {
        /// Item kind
        kind: ItemKind,
        /// Rejected difficulty
        difficulty: Difficulty,
    },

    /// Not a known item kind
    #[error("unknown item kind: {0}")]
    UnknownKind(String),

    /// Not a known difficulty
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Not a palette colour
    #[error("unknown label colour: {0}")]
    UnknownColor(String),
}
