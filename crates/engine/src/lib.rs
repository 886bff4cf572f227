//! Progression engine - item lifecycle, completion rewards, level rollover
//! and the label registry.

#![warn(missing_docs)]

pub mod error;
pub mod labels;
pub mod engine;
pub mod shared;

pub use error::{EngineError, Result};
pub use labels::LabelRegistry;
pub use engine::{ProgressionEngine, EngineConfig, ToggleOutcome};
pub use shared::SharedEngine;
