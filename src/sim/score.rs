//! Score keeping

use serde::{Deserialize, Serialize};

/// Rocks survived this run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.score
    }

    pub fn increment(&mut self) {
        self.score += 1;
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Zero-padded to at least `min_digits` (longer scores are not truncated)
    pub fn formatted(&self, min_digits: usize) -> String {
        format!("{:0width$}", self.score, width = min_digits)
    }
}
