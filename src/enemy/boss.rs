//! Boss-only sub-machines
//!
//! Blast: Inactive -> Charging (telegraph) -> Active (growing radius) -> cooldown.
//! Volley: Inactive -> Casting (three aimed shots) -> cooldown.
//! A roll attempted while either is on cooldown is rejected without side effects.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::enemy::constants::{
    BLAST_ACTIVE_TICKS, BLAST_CHARGE_TICKS, BLAST_COOLDOWN_TICKS, BLAST_MAX_RADIUS,
    PROJECTILE_HIT_RADIUS, VOLLEY_CAST_TICKS, VOLLEY_COOLDOWN_TICKS, VOLLEY_SHOTS,
    VOLLEY_SHOT_INTERVAL_TICKS,
};
use crate::enemy::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlastPhase {
    #[default]
    Inactive,
    Charging,
    Active,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlastAbility {
    pub phase: BlastPhase,
    pub timer: u32,
    pub radius: f32,
    pub cooldown_remaining: u32,
}

impl BlastAbility {
    pub fn is_ready(&self) -> bool {
        self.phase == BlastPhase::Inactive && self.cooldown_remaining == 0
    }

    pub fn is_engaged(&self) -> bool {
        self.phase != BlastPhase::Inactive
    }

    pub fn is_active(&self) -> bool {
        self.phase == BlastPhase::Active
    }

    pub fn try_begin(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.phase = BlastPhase::Charging;
        self.timer = BLAST_CHARGE_TICKS;
        true
    }

    /// Drop back to Inactive without arming the cooldown (boss died)
    pub fn cancel(&mut self) {
        self.phase = BlastPhase::Inactive;
        self.timer = 0;
        self.radius = 0.0;
    }

    pub fn tick(&mut self) {
        match self.phase {
            BlastPhase::Inactive => {
                self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
            }
            BlastPhase::Charging => {
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    self.phase = BlastPhase::Active;
                    self.timer = BLAST_ACTIVE_TICKS;
                    self.radius = 0.0;
                }
            }
            BlastPhase::Active => {
                self.timer = self.timer.saturating_sub(1);
                let elapsed = (BLAST_ACTIVE_TICKS - self.timer) as f32;
                self.radius =
                    (BLAST_MAX_RADIUS * elapsed / BLAST_ACTIVE_TICKS as f32).min(BLAST_MAX_RADIUS);
                if self.timer == 0 {
                    self.phase = BlastPhase::Inactive;
                    self.radius = 0.0;
                    self.cooldown_remaining = BLAST_COOLDOWN_TICKS;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolleyPhase {
    #[default]
    Inactive,
    Casting,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileVolley {
    pub phase: VolleyPhase,
    pub cast_remaining: u32,
    pub cooldown_remaining: u32,
    /// Live projectiles in emission order
    pub projectiles: Vec<Projectile>,
}

impl ProjectileVolley {
    pub fn is_ready(&self) -> bool {
        self.phase == VolleyPhase::Inactive && self.cooldown_remaining == 0
    }

    pub fn is_casting(&self) -> bool {
        self.phase == VolleyPhase::Casting
    }

    pub fn try_begin(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.phase = VolleyPhase::Casting;
        self.cast_remaining = VOLLEY_CAST_TICKS;
        true
    }

    /// Stop casting; projectiles already in flight keep flying
    pub fn cancel(&mut self) {
        self.phase = VolleyPhase::Inactive;
        self.cast_remaining = 0;
    }

    /// Fly existing projectiles, then emit on the cast schedule
    pub fn tick(&mut self, origin: Vec2, target: Vec2) {
        for projectile in &mut self.projectiles {
            projectile.tick(target);
        }
        self.projectiles.retain(|p| !p.is_expired());

        match self.phase {
            VolleyPhase::Inactive => {
                self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
            }
            VolleyPhase::Casting => {
                let elapsed = VOLLEY_CAST_TICKS - self.cast_remaining;
                if elapsed % VOLLEY_SHOT_INTERVAL_TICKS == 0
                    && elapsed / VOLLEY_SHOT_INTERVAL_TICKS < VOLLEY_SHOTS
                {
                    self.projectiles.push(Projectile::aimed(origin, target));
                }
                self.cast_remaining = self.cast_remaining.saturating_sub(1);
                if self.cast_remaining == 0 {
                    self.phase = VolleyPhase::Inactive;
                    self.cooldown_remaining = VOLLEY_COOLDOWN_TICKS;
                }
            }
        }
    }

    /// Remove every projectile touching `point`; returns how many hit
    pub fn consume_hits(&mut self, point: Vec2) -> usize {
        let before = self.projectiles.len();
        self.projectiles
            .retain(|p| !p.hits(point, PROJECTILE_HIT_RADIUS));
        before - self.projectiles.len()
    }
}

/// Abilities carried by a boss; the volley only by the heavy variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossAbilities {
    pub blast: BlastAbility,
    pub volley: Option<ProjectileVolley>,
}

impl BossAbilities {
    pub fn new(heavy: bool) -> Self {
        Self {
            blast: BlastAbility::default(),
            volley: heavy.then(ProjectileVolley::default),
        }
    }

    /// A special is telegraphing or running; the decision loop stays out
    pub fn is_engaged(&self) -> bool {
        self.blast.is_engaged() || self.volley.as_ref().is_some_and(|v| v.is_casting())
    }

    pub fn tick(&mut self, origin: Vec2, target: Vec2, alive: bool) {
        if !alive {
            self.blast.cancel();
            if let Some(volley) = &mut self.volley {
                volley.cancel();
            }
        }
        self.blast.tick();
        if let Some(volley) = &mut self.volley {
            volley.tick(origin, target);
        }
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.volley
            .as_ref()
            .map(|v| v.projectiles.as_slice())
            .unwrap_or(&[])
    }
}
