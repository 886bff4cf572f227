//! Progress summary over items and stats.

use chrono::{DateTime, Utc};
use habitquest_core::{EngineSnapshot, ItemKind, ProgressionStats, TrackableItem};
use habitquest_engine::ProgressionEngine;
use serde::{Deserialize, Serialize};

/// Anything that can hand out items and stats for summarizing.
pub trait ProgressSource {
    /// Items to summarize.
    fn items(&self) -> &[TrackableItem];

    /// Current stats.
    fn stats(&self) -> ProgressionStats;
}

impl ProgressSource for ProgressionEngine {
    fn items(&self) -> &[TrackableItem] {
        ProgressionEngine::items(self)
    }

    fn stats(&self) -> ProgressionStats {
        self.get_stats()
    }
}

impl ProgressSource for EngineSnapshot {
    fn items(&self) -> &[TrackableItem] {
        &self.items
    }

    fn stats(&self) -> ProgressionStats {
        self.stats
    }
}

/// A summary of progress at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// When summary was taken
    pub timestamp: DateTime<Utc>,

    /// All items
    pub total_items: usize,

    /// Items currently completed
    pub completed_items: usize,

    /// Completed share in percent (0 when there are no items)
    pub completion_rate: f32,

    /// Sum of every item's streak
    pub total_streak: u64,

    /// Per-kind counts
    pub breakdown: Vec<KindBreakdown>,

    /// Level
    pub level: u32,

    /// Experience toward next level
    pub experience: u32,

    /// Experience still missing for next level
    pub experience_to_next_level: u32,

    /// Gold
    pub gold: u32,

    /// Health
    pub health: u32,
}

/// Item counts for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindBreakdown {
    /// Kind
    pub kind: ItemKind,
    /// Items of this kind
    pub total: usize,
    /// Completed items of this kind
    pub completed: usize,
}

impl ProgressSummary {
    /// Summarize any progress source.
    pub fn from_source(source: &impl ProgressSource) -> Self {
        Self::from_parts(source.items(), source.stats())
    }

    /// Summarize raw items and stats.
    pub fn from_parts(items: &[TrackableItem], stats: ProgressionStats) -> Self {
        let total_items = items.len();
        let completed_items = items.iter().filter(|i| i.completed).count();
        let completion_rate = if total_items > 0 {
            (completed_items as f32 / total_items as f32) * 100.0
        } else {
            0.0
        };

        let breakdown = ItemKind::ALL
            .into_iter()
            .map(|kind| KindBreakdown {
                kind,
                total: items.iter().filter(|i| i.kind == kind).count(),
                completed: items.iter().filter(|i| i.kind == kind && i.completed).count(),
            })
            .collect();

        Self {
            timestamp: Utc::now(),
            total_items,
            completed_items,
            completion_rate,
            total_streak: items.iter().map(|i| u64::from(i.streak)).sum(),
            breakdown,
            level: stats.level,
            experience: stats.experience,
            experience_to_next_level: stats.experience_to_next_level(),
            gold: stats.gold,
            health: stats.health,
        }
    }

    /// Counts for one kind.
    pub fn for_kind(&self, kind: ItemKind) -> KindBreakdown {
        self.breakdown
            .iter()
            .copied()
            .find(|b| b.kind == kind)
            .unwrap_or(KindBreakdown { kind, total: 0, completed: 0 })
    }
}
