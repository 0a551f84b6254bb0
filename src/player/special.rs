//! Special ability lifecycle
//!
//! Idle -> Charging -> Active -> Idle. The cooldown is armed in full on
//! trigger and runs concurrently with charge and active.

use serde::{Deserialize, Serialize};

use crate::player::constants::{
    SPECIAL_ACTIVE_TICKS, SPECIAL_CHARGE_TICKS, SPECIAL_COOLDOWN_TICKS, SPECIAL_MAX_RADIUS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpecialPhase {
    #[default]
    Idle,
    Charging,
    Active,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialAbility {
    unlocked: bool,
    pub phase: SpecialPhase,
    pub cooldown_remaining: u32,
    pub charge_remaining: u32,
    pub active_remaining: u32,
    /// Grows 0 -> max while Active, 0 otherwise
    pub blast_radius: f32,
}

impl SpecialAbility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Unlock the ability; returns true only the first time
    pub fn unlock(&mut self) -> bool {
        let newly = !self.unlocked;
        self.unlocked = true;
        newly
    }

    pub fn is_active(&self) -> bool {
        self.phase == SpecialPhase::Active
    }

    /// Charging or Active; the player accepts no other actions meanwhile
    pub fn is_busy(&self) -> bool {
        self.phase != SpecialPhase::Idle
    }

    pub fn is_ready(&self) -> bool {
        self.unlocked && self.cooldown_remaining == 0 && self.phase == SpecialPhase::Idle
    }

    /// Remaining cooldown as a fraction of the full cooldown
    pub fn cooldown_fraction(&self) -> f32 {
        (self.cooldown_remaining as f32 / SPECIAL_COOLDOWN_TICKS as f32).clamp(0.0, 1.0)
    }

    /// Start charging if unlocked and off cooldown
    pub fn try_trigger(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.phase = SpecialPhase::Charging;
        self.charge_remaining = SPECIAL_CHARGE_TICKS;
        self.cooldown_remaining = SPECIAL_COOLDOWN_TICKS;
        true
    }

    pub fn tick(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);

        match self.phase {
            SpecialPhase::Idle => {}
            SpecialPhase::Charging => {
                self.charge_remaining = self.charge_remaining.saturating_sub(1);
                if self.charge_remaining == 0 {
                    self.phase = SpecialPhase::Active;
                    self.active_remaining = SPECIAL_ACTIVE_TICKS;
                    self.blast_radius = 0.0;
                }
            }
            SpecialPhase::Active => {
                self.active_remaining = self.active_remaining.saturating_sub(1);
                if self.active_remaining == 0 {
                    self.phase = SpecialPhase::Idle;
                    self.blast_radius = 0.0;
                } else {
                    let elapsed = (SPECIAL_ACTIVE_TICKS - self.active_remaining) as f32;
                    self.blast_radius = (SPECIAL_MAX_RADIUS * elapsed / SPECIAL_ACTIVE_TICKS as f32)
                        .min(SPECIAL_MAX_RADIUS);
                }
            }
        }
    }
}
