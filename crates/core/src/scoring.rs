//! Scoring module - running total of merge points
//!
//! Each merge adds the value of the tile it produces (a 2+2 merge scores 4).
//! [`ScoreTracker::add`] is the only way the total grows.

/// Running score of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoreTracker {
    total: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self { total: 0 }
    }

    /// Continue from a previously saved total.
    pub fn resume(total: u64) -> Self {
        Self { total }
    }

    /// Add merge points.
    pub fn add(&mut self, amount: u64) {
        self.total = self.total.saturating_add(amount);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}
