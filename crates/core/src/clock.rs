//! Time source used to stamp `created_at` and `completed_at`.

use crate::Time;

/// Something that can tell the current time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> Time;
}

/// Wall clock backed by `chrono::Utc::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        chrono::Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Time);

impl Clock for FixedClock {
    fn now(&self) -> Time {
        self.0
    }
}
