//! Unique identifiers for HabitQuest entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a TrackableItem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Ulid);

impl ItemId {
    /// Generate a new random ItemId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Wrap an already generated ULID.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ItemId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a Label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(Ulid);

impl LabelId {
    /// Generate a new random LabelId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Wrap an already generated ULID.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl Default for LabelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for LabelId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Source of fresh identifiers.
///
/// The engine never creates ids on its own; it asks the injected generator,
/// so callers can swap random ids for a deterministic sequence.
pub trait IdGenerator: Send {
    /// Produce the next identifier. Must never repeat for one generator.
    fn generate(&mut self) -> Ulid;
}

/// Random ULIDs (the default).
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn generate(&mut self) -> Ulid {
        Ulid::new()
    }
}

/// Counter-backed ids: `1, 2, 3, ...` encoded as ULIDs.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Start counting at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`.
    pub fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> Ulid {
        let id = Ulid::from(self.next);
        self.next += 1;
        id
    }
}
