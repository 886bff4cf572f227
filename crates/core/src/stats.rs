//! Player-facing progression stats and the level rollover rule.

use serde::{Deserialize, Serialize};

/// Experience needed to gain one level.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

/// Starting health. Nothing changes it yet.
pub const DEFAULT_HEALTH: u32 = 50;

/// Level, experience, gold and health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStats {
    /// Current level, starts at 1
    pub level: u32,

    /// Experience toward the next level
    pub experience: u32,

    /// Accumulated gold
    pub gold: u32,

    /// Carried as inert state
    pub health: u32,
}

impl Default for ProgressionStats {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            gold: 0,
            health: DEFAULT_HEALTH,
        }
    }
}

impl ProgressionStats {
    /// Add a completion reward and roll experience over into levels.
    ///
    /// Returns the number of levels gained.
    pub fn apply_reward(&mut self, reward: Reward, mode: RolloverMode) -> u32 {
        self.experience = self.experience.saturating_add(reward.experience);
        self.gold = self.gold.saturating_add(reward.gold);
        self.roll_over(mode)
    }

    /// Convert experience at or above the threshold into levels.
    pub fn roll_over(&mut self, mode: RolloverMode) -> u32 {
        let mut gained = 0;
        while self.experience >= EXPERIENCE_PER_LEVEL {
            self.level = self.level.saturating_add(1);
            self.experience -= EXPERIENCE_PER_LEVEL;
            gained += 1;
            if mode == RolloverMode::Single {
                break;
            }
        }
        gained
    }

    /// Experience still missing for the next level.
    pub fn experience_to_next_level(&self) -> u32 {
        EXPERIENCE_PER_LEVEL.saturating_sub(self.experience)
    }
}

/// Experience and gold granted by one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Experience points
    pub experience: u32,
    /// Gold coins
    pub gold: u32,
}

impl Reward {
    /// Build a reward.
    pub const fn new(experience: u32, gold: u32) -> Self {
        Self { experience, gold }
    }
}

/// How many levels one reward may roll over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloverMode {
    /// Keep rolling until experience is below the threshold
    #[default]
    Repeat,
    /// At most one level per reward
    Single,
}
