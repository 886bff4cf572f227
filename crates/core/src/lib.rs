//! HabitQuest core data models.
//!
//! This crate defines the records the progression engine works on:
//! trackable items, player stats, labels and the rules that tie them
//! together.

#![warn(missing_docs)]

// Core identities
mod id;
mod clock;

// Items and progression
mod item;
mod stats;
mod policy;

// Labels
mod label;

// State transfer
mod snapshot;
mod batch;
mod error;

// Re-exports
pub use id::*;
pub use clock::{Clock, SystemClock, FixedClock};

pub use item::{
    TrackableItem, ItemKind, Difficulty, NewItem, ItemUpdate, ItemFilter,
    normalize_title, normalize_description, normalize_tags,
};
pub use stats::{ProgressionStats, Reward, RolloverMode, EXPERIENCE_PER_LEVEL, DEFAULT_HEALTH};
pub use policy::{KindPolicy, KindPolicyTable};
pub use label::{Label, LabelColor, normalize_label_name};
pub use snapshot::{EngineSnapshot, SnapshotError};
pub use batch::titles_from_lines;
pub use error::ValidationError;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
