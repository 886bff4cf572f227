//! Progress tracking
//!
//! Completion rate, streak totals and per-kind breakdown.

#![warn(missing_docs)]

pub mod tracker;

pub use tracker::{ProgressSource, ProgressSummary, KindBreakdown};
