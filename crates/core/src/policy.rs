//! Per-kind rules: which difficulties are allowed and whether completions
//! count toward a streak.

use serde::{Deserialize, Serialize};
use crate::error::ValidationError;
use crate::item::{Difficulty, ItemKind};

/// Rules for one item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPolicy {
    /// Difficulties an item of this kind may carry
    pub allowed_difficulties: Vec<Difficulty>,

    /// Whether completing bumps the streak
    pub tracks_streak: bool,
}

impl KindPolicy {
    /// Every difficulty, streak tracked.
    pub fn open() -> Self {
        Self {
            allowed_difficulties: Difficulty::ALL.to_vec(),
            tracks_streak: true,
        }
    }

    /// Whether `difficulty` is allowed.
    pub fn allows(&self, difficulty: Difficulty) -> bool {
        self.allowed_difficulties.contains(&difficulty)
    }
}

/// One policy row per item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPolicyTable {
    /// Rules for dailies
    pub daily: KindPolicy,

    /// Rules for todos
    pub todo: KindPolicy,
}

impl KindPolicyTable {
    /// Both kinds take any difficulty and both track streaks.
    pub fn permissive() -> Self {
        Self {
            daily: KindPolicy::open(),
            todo: KindPolicy::open(),
        }
    }

    /// Dailies skip `Trivial`; todos are one-shot and keep no streak.
    pub fn strict() -> Self {
        Self {
            daily: KindPolicy {
                allowed_difficulties: vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
                tracks_streak: true,
            },
            todo: KindPolicy {
                allowed_difficulties: Difficulty::ALL.to_vec(),
                tracks_streak: false,
            },
        }
    }

    /// Row for `kind`.
    pub fn for_kind(&self, kind: ItemKind) -> &KindPolicy {
        match kind {
            ItemKind::Daily => &self.daily,
            ItemKind::Todo => &self.todo,
        }
    }

    /// Reject a difficulty the kind does not allow.
    pub fn check(&self, kind: ItemKind, difficulty: Difficulty) -> Result<(), ValidationError> {
        if self.for_kind(kind).allows(difficulty) {
            Ok(())
        } else {
            Err(ValidationError::DifficultyNotAllowed { kind, difficulty })
        }
    }
}

impl Default for KindPolicyTable {
    fn default() -> Self {
        Self::permissive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_allows_everything() {
        let table = KindPolicyTable::permissive();
        for kind in ItemKind::ALL {
            for difficulty in Difficulty::ALL {
                assert!(table.check(kind, difficulty).is_ok());
            }
            assert!(table.for_kind(kind).tracks_streak);
        }
    }

    #[test]
    fn strict_rejects_trivial_dailies() {
        let table = KindPolicyTable::strict();
        assert_eq!(
            table.check(ItemKind::Daily, Difficulty::Trivial),
            Err(ValidationError::DifficultyNotAllowed {
                kind: ItemKind::Daily,
                difficulty: Difficulty::Trivial,
            })
        );
        assert!(table.check(ItemKind::Todo, Difficulty::Trivial).is_ok());
        assert!(!table.for_kind(ItemKind::Todo).tracks_streak);
    }
}
