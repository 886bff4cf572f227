//! Serializable copy of the full engine state.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::id::{ItemId, LabelId};
use crate::item::TrackableItem;
use crate::label::Label;
use crate::stats::ProgressionStats;

/// Items, stats and labels as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Items in insertion order
    #[serde(default)]
    pub items: Vec<TrackableItem>,

    /// Player stats
    #[serde(default)]
    pub stats: ProgressionStats,

    /// Labels in insertion order
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl EngineSnapshot {
    /// Check the invariants a restored engine relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut item_ids = HashSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id) {
                return Err(SnapshotError::DuplicateItemId(item.id));
            }
            if item.title.trim().is_empty() {
                return Err(SnapshotError::BlankTitle(item.id));
            }
            if !item.is_consistent() {
                return Err(SnapshotError::CompletionMismatch(item.id));
            }
        }

        let mut label_ids = HashSet::new();
        for label in &self.labels {
            if !label_ids.insert(label.id) {
                return Err(SnapshotError::DuplicateLabelId(label.id));
            }
            if label.name.trim().is_empty() {
                return Err(SnapshotError::BlankLabelName(label.id));
            }
        }

        if self.stats.level == 0 {
            return Err(SnapshotError::ZeroLevel);
        }

        Ok(())
    }
}

/// Reasons a snapshot cannot be restored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Two items share an id
    #[error("duplicate item id {0}")]
    DuplicateItemId(ItemId),

    /// Two labels share an id
    #[error("duplicate label id {0}")]
    DuplicateLabelId(LabelId),

    /// An item has a blank title
    #[error("item {0} has a blank title")]
    BlankTitle(ItemId),

    /// A label has a blank name
    #[error("label {0} has a blank name")]
    BlankLabelName(LabelId),

    /// `completed` and `completed_at` disagree
    #[error("item {0} has completed/completed_at out of sync")]
    CompletionMismatch(ItemId),

    /// Levels start at 1
    #[error("stats level must be at least 1")]
    ZeroLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Difficulty, ItemKind};

    fn item(title: &str) -> TrackableItem {
        TrackableItem::new(ItemId::new(), ItemKind::Daily, title, Difficulty::Easy, chrono::Utc::now()).unwrap()
    }

    #[test]
    fn empty_snapshot_is_valid() {
        assert_eq!(EngineSnapshot::default().validate(), Ok(()));
    }

    #[test]
    fn duplicate_item_ids_are_rejected() {
        let a = item("a");
        let mut b = item("b");
        b.id = a.id;
        let snapshot = EngineSnapshot { items: vec![a.clone(), b], ..Default::default() };
        assert_eq!(snapshot.validate(), Err(SnapshotError::DuplicateItemId(a.id)));
    }

    #[test]
    fn completed_without_timestamp_is_rejected() {
        let mut a = item("a");
        a.completed = true;
        let snapshot = EngineSnapshot { items: vec![a.clone()], ..Default::default() };
        assert_eq!(snapshot.validate(), Err(SnapshotError::CompletionMismatch(a.id)));
    }

    #[test]
    fn blank_label_name_is_rejected() {
        let id = LabelId::new();
        let json = serde_json::json!({
            "labels": [{ "id": id.to_string(), "name": "  ", "color": "#f44336" }]
        });
        let snapshot: EngineSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.validate(), Err(SnapshotError::BlankLabelName(id)));
    }

    #[test]
    fn missing_sections_default_on_decode() {
        let snapshot: EngineSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.stats, ProgressionStats::default());
    }
}
