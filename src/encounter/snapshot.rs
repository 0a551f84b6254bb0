//! Read-only view of the encounter for rendering, HUD and autopilots

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, AnimationState};
use crate::core::types::{ActorId, Facing, Tick, Vec2};
use crate::encounter::theme::MusicTheme;
use crate::player::SpecialPhase;

/// Drawable state of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub position: Vec2,
    pub facing: Facing,
    pub state: AnimationState,
    pub frame: u8,
    pub scale: f32,
    pub health: u32,
    pub max_health: u32,
    pub invincible: bool,
    pub is_boss: bool,
    /// Expanding ring radius: special for the player, blast for a boss
    pub ring_radius: Option<f32>,
}

impl ActorView {
    pub fn from_actor(actor: &Actor, is_boss: bool, ring_radius: Option<f32>) -> Self {
        Self {
            id: actor.id,
            position: actor.position,
            facing: actor.facing,
            state: actor.state(),
            frame: actor.current_frame(),
            scale: actor.scale,
            health: actor.health(),
            max_health: actor.max_health(),
            invincible: actor.is_invincible(),
            is_boss,
            ring_radius,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub tick: Tick,
    pub arena_width: f32,
    pub floor_top: f32,
    pub floor_bottom: f32,

    pub health: u32,
    pub max_health: u32,
    pub chaos_score: u64,
    pub multiplier: u32,
    pub combo_streak: u32,
    pub phase: u8,
    pub phase_target: u64,

    pub special_unlocked: bool,
    pub special_phase: SpecialPhase,
    /// 1.0 right after triggering, 0.0 when ready
    pub special_cooldown_fraction: f32,

    pub boss_active: bool,
    pub phase_transitioning: bool,
    pub hitstop_active: bool,
    pub victory: bool,
    pub defeated: bool,
    pub paused: bool,
    pub theme: MusicTheme,

    pub player: ActorView,
    pub enemies: Vec<ActorView>,
    pub projectiles: Vec<Vec2>,
}

impl EncounterSnapshot {
    pub fn alive_enemies(&self) -> impl Iterator<Item = &ActorView> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    pub fn boss(&self) -> Option<&ActorView> {
        self.enemies.iter().find(|e| e.is_boss)
    }
}
