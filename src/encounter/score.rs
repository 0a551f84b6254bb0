//! Chaos score, combo streak and multiplier

use serde::{Deserialize, Serialize};

use crate::encounter::constants::{MAX_MULTIPLIER, STREAK_PER_MULTIPLIER_STEP};

/// Multiplier earned by a streak: `min(10, 1 + floor(streak / 5))`
pub fn multiplier_for(streak: u32) -> u32 {
    (1 + streak / STREAK_PER_MULTIPLIER_STEP).min(MAX_MULTIPLIER)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    /// Monotonic session score
    pub chaos_score: u64,
    pub combo_streak: u32,
    pub multiplier: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            chaos_score: 0,
            combo_streak: 0,
            multiplier: 1,
        }
    }

    /// The player landed a hit on an enemy
    pub fn register_hit(&mut self) {
        self.combo_streak = self.combo_streak.saturating_add(1);
    }

    /// The player took a hit
    pub fn reset_streak(&mut self) {
        self.combo_streak = 0;
    }

    pub fn recompute(&mut self) {
        self.multiplier = multiplier_for(self.combo_streak);
    }

    /// Add `base` points at the live multiplier; returns points awarded
    pub fn award(&mut self, base: u64) -> u64 {
        let points = base * multiplier_for(self.combo_streak) as u64;
        self.chaos_score = self.chaos_score.saturating_add(points);
        points
    }
}
