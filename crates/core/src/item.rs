//! Trackable item model - dailies and todos.

use serde::{Deserialize, Serialize};
use crate::error::ValidationError;
use crate::id::ItemId;
use crate::stats::Reward;
use crate::Time;

/// A daily habit or a one-off todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackableItem {
    /// Unique identifier
    pub id: ItemId,

    /// Item title, never blank
    pub title: String,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Daily or todo
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Drives the reward on completion
    pub difficulty: Difficulty,

    /// Current completion state
    pub completed: bool,

    /// Set while `completed` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Time>,

    /// Number of completion transitions recorded
    pub streak: u32,

    /// Free-text tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// When created
    pub created_at: Time,
}

impl TrackableItem {
    /// Create an incomplete item with a zero streak.
    pub fn new(
        id: ItemId,
        kind: ItemKind,
        title: &str,
        difficulty: Difficulty,
        created_at: Time,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            title: normalize_title(title)?,
            description: None,
            kind,
            difficulty,
            completed: false,
            completed_at: None,
            streak: 0,
            tags: Vec::new(),
            created_at,
        })
    }

    /// Reward granted when this item flips to completed.
    pub fn reward(&self) -> Reward {
        self.difficulty.reward()
    }

    /// Move to completed, bumping the streak when asked to.
    pub fn mark_completed(&mut self, at: Time, bump_streak: bool) {
        self.completed = true;
        self.completed_at = Some(at);
        if bump_streak {
            self.streak = self.streak.saturating_add(1);
        }
    }

    /// Move back to incomplete. The streak is kept.
    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    /// `completed_at` is present exactly when `completed` is set.
    pub fn is_consistent(&self) -> bool {
        self.completed == self.completed_at.is_some()
    }
}

/// Item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Recurs and accumulates a streak
    Daily,
    /// One-shot
    Todo,
}

impl ItemKind {
    /// Every kind, in display order.
    pub const ALL: [ItemKind; 2] = [ItemKind::Daily, ItemKind::Todo];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Todo => "todo",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "dailies" => Ok(Self::Daily),
            "todo" | "todos" => Ok(Self::Todo),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Item difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 5 exp, 1 gold
    Trivial,
    /// 10 exp, 2 gold
    Easy,
    /// 15 exp, 3 gold
    #[default]
    Medium,
    /// 20 exp, 4 gold
    Hard,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Trivial,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    /// Reward table lookup.
    pub fn reward(&self) -> Reward {
        match self {
            Self::Trivial => Reward::new(5, 1),
            Self::Easy => Reward::new(10, 2),
            Self::Medium => Reward::new(15, 3),
            Self::Hard => Reward::new(20, 4),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trivial" => Ok(Self::Trivial),
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(ValidationError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Request to create an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Daily or todo
    pub kind: ItemKind,
    /// Raw title, trimmed on creation
    pub title: String,
    /// Difficulty (medium unless set)
    pub difficulty: Difficulty,
    /// Optional description
    pub description: Option<String>,
    /// Free-text tags
    pub tags: Vec<String>,
}

impl NewItem {
    /// A medium-difficulty item with no description or tags.
    pub fn new(kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            difficulty: Difficulty::default(),
            description: None,
            tags: Vec::new(),
        }
    }

    /// Shorthand for a daily.
    pub fn daily(title: impl Into<String>) -> Self {
        Self::new(ItemKind::Daily, title)
    }

    /// Shorthand for a todo.
    pub fn todo(title: impl Into<String>) -> Self {
        Self::new(ItemKind::Todo, title)
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Partial update of an existing item. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    /// New title
    pub title: Option<String>,
    /// New difficulty
    pub difficulty: Option<Difficulty>,
    /// New description; an empty string clears it
    pub description: Option<String>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
}

impl ItemUpdate {
    /// Empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Change the difficulty.
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Change the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// True when nothing would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.difficulty.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

/// Filter for listing items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Filter by kind
    pub kind: Option<ItemKind>,

    /// Filter by completion state
    pub completed: Option<bool>,
}

impl ItemFilter {
    /// Only items of `kind`.
    pub fn kind(kind: ItemKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Whether `item` passes the filter.
    pub fn matches(&self, item: &TrackableItem) -> bool {
        self.kind.map_or(true, |k| item.kind == k)
            && self.completed.map_or(true, |c| item.completed == c)
    }
}

impl From<Option<ItemKind>> for ItemFilter {
    fn from(kind: Option<ItemKind>) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

/// Trim a title, rejecting blank input.
pub fn normalize_title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

/// Trim a description; blank means none.
pub fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Trim tags, dropping blanks and repeats.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Time {
        chrono::Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn new_item_is_incomplete_with_zero_streak() {
        let item = TrackableItem::new(ItemId::new(), ItemKind::Daily, "  Drink water ", Difficulty::Easy, at(0)).unwrap();
        assert_eq!(item.title, "Drink water");
        assert!(!item.completed);
        assert_eq!(item.completed_at, None);
        assert_eq!(item.streak, 0);
        assert!(item.is_consistent());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = TrackableItem::new(ItemId::new(), ItemKind::Todo, " \t ", Difficulty::Hard, at(0)).unwrap_err();
        assert_eq!(err, ValidationError::BlankTitle);
    }

    #[test]
    fn uncompleting_keeps_streak() {
        let mut item = TrackableItem::new(ItemId::new(), ItemKind::Daily, "Read", Difficulty::Medium, at(0)).unwrap();
        item.mark_completed(at(10), true);
        assert_eq!(item.streak, 1);
        assert_eq!(item.completed_at, Some(at(10)));

        item.mark_incomplete();
        assert!(!item.completed);
        assert_eq!(item.completed_at, None);
        assert_eq!(item.streak, 1);
    }

    #[test]
    fn reward_table_matches_difficulty() {
        assert_eq!(Difficulty::Trivial.reward(), Reward::new(5, 1));
        assert_eq!(Difficulty::Easy.reward(), Reward::new(10, 2));
        assert_eq!(Difficulty::Medium.reward(), Reward::new(15, 3));
        assert_eq!(Difficulty::Hard.reward(), Reward::new(20, 4));
    }

    #[test]
    fn kind_and_difficulty_parse_case_insensitively() {
        assert_eq!("Daily".parse::<ItemKind>().unwrap(), ItemKind::Daily);
        assert_eq!("TODO".parse::<ItemKind>().unwrap(), ItemKind::Todo);
        assert_eq!(" hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(matches!(
            "epic".parse::<Difficulty>(),
            Err(ValidationError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn serialization_uses_type_field_and_lowercase_enums() {
        let mut item = TrackableItem::new(ItemId::new(), ItemKind::Todo, "Ship it", Difficulty::Trivial, at(0)).unwrap();
        item.tags = vec!["work".to_string()];
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "todo");
        assert_eq!(json["difficulty"], "trivial");
        assert_eq!(json["tags"][0], "work");
        assert!(json.get("completed_at").is_none());

        let decoded: TrackableItem = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, item);
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let tags = normalize_tags(["  health", "", "health", "morning "]);
        assert_eq!(tags, vec!["health".to_string(), "morning".to_string()]);
    }

    #[test]
    fn filter_matches_kind_and_completion() {
        let mut item = TrackableItem::new(ItemId::new(), ItemKind::Todo, "x", Difficulty::Easy, at(0)).unwrap();
        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter::kind(ItemKind::Todo).matches(&item));
        assert!(!ItemFilter::kind(ItemKind::Daily).matches(&item));

        item.mark_completed(at(1), false);
        let open_only = ItemFilter { completed: Some(false), ..Default::default() };
        assert!(!open_only.matches(&item));
    }
}
