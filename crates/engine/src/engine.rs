//! The progression engine - owns items and stats, applies transitions.

use habitquest_core::{
    normalize_description, normalize_tags, normalize_title, Clock, EngineSnapshot, IdGenerator,
    ItemFilter, ItemId, ItemKind, ItemUpdate, KindPolicyTable, Label, LabelColor, LabelId, NewItem,
    ProgressionStats, RolloverMode, SystemClock, TrackableItem, UlidGenerator,
};
use tracing::{debug, info, warn};
use crate::error::{EngineError, Result};
use crate::labels::LabelRegistry;

/// Configuration for the progression engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Per-kind difficulty and streak rules
    pub policy: KindPolicyTable,
    /// How far one reward may roll experience over
    pub rollover: RolloverMode,
}

impl EngineConfig {
    /// Dailies without `Trivial`, todos without streaks.
    pub fn strict() -> Self {
        Self {
            policy: KindPolicyTable::strict(),
            ..Default::default()
        }
    }

    /// Set the policy table.
    pub fn with_policy(mut self, policy: KindPolicyTable) -> Self {
        self.policy = policy;
        self
    }

    /// Set the rollover mode.
    pub fn with_rollover(mut self, rollover: RolloverMode) -> Self {
        self.rollover = rollover;
        self
    }
}

/// Result of a completion toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// The item after the toggle
    pub item: TrackableItem,
    /// Stats after the toggle
    pub stats: ProgressionStats,
    /// Levels gained by this toggle (0 when un-completing)
    pub levels_gained: u32,
}

/// The progression engine.
///
/// Single-owner and synchronous: every call runs to completion and either
/// applies fully or returns an error with nothing changed. Wrap it in
/// [`crate::SharedEngine`] to share it between tasks.
pub struct ProgressionEngine {
    items: Vec<TrackableItem>,
    stats: ProgressionStats,
    labels: LabelRegistry,
    config: EngineConfig,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl ProgressionEngine {
    /// Create an empty engine with default stats.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            stats: ProgressionStats::default(),
            labels: LabelRegistry::new(),
            config: EngineConfig::default(),
            ids: Box::new(UlidGenerator),
            clock: Box::new(SystemClock),
        }
    }

    /// Rebuild an engine from a snapshot.
    pub fn restore(snapshot: EngineSnapshot) -> Result<Self> {
        if let Err(e) = snapshot.validate() {
            warn!("Rejected snapshot: {}", e);
            return Err(e.into());
        }

        debug!(
            items = snapshot.items.len(),
            labels = snapshot.labels.len(),
            "restoring engine from snapshot"
        );
        Ok(Self {
            items: snapshot.items,
            stats: snapshot.stats,
            labels: LabelRegistry::from_labels(snapshot.labels),
            ..Self::new()
        })
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the starting stats.
    pub fn with_stats(mut self, stats: ProgressionStats) -> Self {
        self.stats = stats;
        self
    }

    /// Set the id source.
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Set the time source.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Items ===

    /// Create a new item.
    pub fn create_item(&mut self, request: NewItem) -> Result<TrackableItem> {
        let title = normalize_title(&request.title)?;
        self.config.policy.check(request.kind, request.difficulty)?;

        let id = self.fresh_item_id();
        let mut item = TrackableItem::new(id, request.kind, &title, request.difficulty, self.clock.now())?;
        item.description = normalize_description(request.description.as_deref());
        item.tags = normalize_tags(&request.tags);

        debug!(%id, kind = %item.kind, difficulty = %item.difficulty, title = %item.title, "item created");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Apply a partial update. Completion state, streak and creation time
    /// are never touched.
    pub fn update_item(&mut self, id: ItemId, update: ItemUpdate) -> Result<TrackableItem> {
        let index = self.index_of(id)?;

        // Validate everything before mutating anything.
        let title = update.title.as_deref().map(normalize_title).transpose()?;
        if let Some(difficulty) = update.difficulty {
            self.config.policy.check(self.items[index].kind, difficulty)?;
        }

        let item = &mut self.items[index];
        if let Some(title) = title {
            item.title = title;
        }
        if let Some(difficulty) = update.difficulty {
            item.difficulty = difficulty;
        }
        if let Some(description) = update.description.as_deref() {
            item.description = normalize_description(Some(description));
        }
        if let Some(tags) = &update.tags {
            item.tags = normalize_tags(tags);
        }

        debug!(%id, title = %item.title, difficulty = %item.difficulty, "item updated");
        Ok(item.clone())
    }

    /// Delete an item. Unknown ids are a silent no-op.
    pub fn delete_item(&mut self, id: ItemId) -> Option<TrackableItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        debug!(%id, "item deleted");
        Some(self.items.remove(index))
    }

    /// Flip an item's completion state.
    ///
    /// Completing sets `completed_at`, bumps the streak (when the kind
    /// tracks one) and pays the difficulty reward. Un-completing only
    /// clears `completed_at`; streak and stats keep what was earned.
    pub fn toggle_completion(&mut self, id: ItemId) -> Result<ToggleOutcome> {
        let index = self.index_of(id)?;
        let now = self.clock.now();
        let rollover = self.config.rollover;
        let tracks_streak = self.config.policy.for_kind(self.items[index].kind).tracks_streak;

        let item = &mut self.items[index];
        let mut levels_gained = 0;
        if item.completed {
            item.mark_incomplete();
            debug!(%id, "item marked incomplete");
        } else {
            item.mark_completed(now, tracks_streak);
            let reward = item.reward();
            levels_gained = self.stats.apply_reward(reward, rollover);
            debug!(
                %id,
                streak = item.streak,
                exp = reward.experience,
                gold = reward.gold,
                "item completed"
            );
            if levels_gained > 0 {
                info!("Level up! Now level {} ({} exp)", self.stats.level, self.stats.experience);
            }
        }

        Ok(ToggleOutcome {
            item: item.clone(),
            stats: self.stats,
            levels_gained,
        })
    }

    /// Items in insertion order, optionally of one kind.
    pub fn list_items(&self, kind: Option<ItemKind>) -> Vec<TrackableItem> {
        self.query_items(&ItemFilter::from(kind))
    }

    /// Items matching `filter`, in insertion order.
    pub fn query_items(&self, filter: &ItemFilter) -> Vec<TrackableItem> {
        self.items.iter().filter(|i| filter.matches(i)).cloned().collect()
    }

    /// Look up one item.
    pub fn get_item(&self, id: ItemId) -> Option<&TrackableItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Every item, borrowed.
    pub fn items(&self) -> &[TrackableItem] {
        &self.items
    }

    /// Stats snapshot.
    pub fn get_stats(&self) -> ProgressionStats {
        self.stats
    }

    // === Labels ===

    /// Create a label.
    pub fn add_label(&mut self, name: &str, color: LabelColor) -> Result<Label> {
        let id = self.fresh_label_id();
        let label = Label::new(id, name, color)?;
        Ok(self.labels.insert(label))
    }

    /// Rename and recolour a label.
    pub fn update_label(&mut self, id: LabelId, name: &str, color: LabelColor) -> Result<Label> {
        self.labels.update(id, name, color)
    }

    /// Delete a label. Unknown ids are a silent no-op.
    pub fn delete_label(&mut self, id: LabelId) -> Option<Label> {
        self.labels.remove(id)
    }

    /// Label registry, read-only.
    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    // === State transfer ===

    /// Copy the full state out for persistence.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            items: self.items.clone(),
            stats: self.stats,
            labels: self.labels.list().to_vec(),
        }
    }

    fn index_of(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("item {}", id)))
    }

    fn fresh_item_id(&mut self) -> ItemId {
        loop {
            let id = ItemId::from_ulid(self.ids.generate());
            if self.get_item(id).is_none() {
                return id;
            }
            warn!(%id, "id generator repeated an existing id, retrying");
        }
    }

    fn fresh_label_id(&mut self) -> LabelId {
        loop {
            let id = LabelId::from_ulid(self.ids.generate());
            if self.labels.get(id).is_none() {
                return id;
            }
            warn!(%id, "id generator repeated an existing label id, retrying");
        }
    }
}

impl Default for ProgressionEngine {
    fn default() -> Self {
        Self::new()
    }
}
