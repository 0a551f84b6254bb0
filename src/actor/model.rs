//! The Actor record: geometry queries, damage intake and the per-tick step

use serde::{Deserialize, Serialize};

use crate::actor::animation::AnimationState;
use crate::actor::constants::{
    ACTOR_HEIGHT, ACTOR_WIDTH, ATTACK_BOX_HEIGHT, ATTACK_BOX_LIFT, HIT_INVINCIBILITY_TICKS,
    HIT_STUN_TICKS, KNOCKBACK_FORCE, MIN_KNOCKBACK_SCALE, VELOCITY_DAMPING,
};
use crate::core::types::{ActorId, Facing, Rect, Vec2};

/// Result of offering damage to an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible or already dead; nothing changed
    Ignored,
    /// Damage applied, actor is in hit-stun
    Hit,
    /// Damage applied and health reached zero
    Killed,
}

impl DamageOutcome {
    /// Did the damage land? Side effects (audio cue, hitstop) key off this.
    pub fn landed(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// A simulated combatant
///
/// Invariants held by construction:
/// - `0 <= health <= max_health`
/// - `health == 0` exactly when `state == Dead`
/// - `state` only changes through `set_animation_state`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Bottom-center of the body
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Rendering and hitbox multiplier
    pub scale: f32,
    /// Walking speed in arena units per tick
    pub speed: f32,
    health: u32,
    max_health: u32,
    state: AnimationState,
    current_frame: u8,
    frame_tick: u8,
    state_timer: u32,
    invincibility_timer: u32,
}

impl Actor {
    pub fn new(id: ActorId, position: Vec2, max_health: u32, speed: f32, scale: f32) -> Self {
        let max_health = max_health.max(1);
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            scale: scale.max(0.0),
            speed,
            health: max_health,
            max_health,
            state: AnimationState::Idle,
            current_frame: 0,
            frame_tick: 0,
            state_timer: 0,
            invincibility_timer: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn current_frame(&self) -> u8 {
        self.current_frame
    }

    pub fn state_timer(&self) -> u32 {
        self.state_timer
    }

    pub fn invincibility_timer(&self) -> u32 {
        self.invincibility_timer
    }

    pub fn is_alive(&self) -> bool {
        self.state != AnimationState::Dead
    }

    pub fn is_dead(&self) -> bool {
        self.state == AnimationState::Dead
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0
    }

    /// Dead and the death animation has fully elapsed; ready to be reaped
    pub fn death_complete(&self) -> bool {
        self.is_dead() && self.state_timer == 0
    }

    /// Extend (never shorten) the invincibility window
    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincibility_timer = self.invincibility_timer.max(ticks);
    }

    /// Restore health, capped at max. The dead stay dead.
    pub fn heal(&mut self, amount: u32) {
        if self.is_alive() {
            self.health = self.health.saturating_add(amount).min(self.max_health);
        }
    }

    /// Body rectangle; its bottom-center sits at `position`
    pub fn body_hitbox(&self) -> Rect {
        let width = ACTOR_WIDTH * self.scale;
        let height = ACTOR_HEIGHT * self.scale;
        Rect::new(
            self.position.x - width / 2.0,
            self.position.y - height,
            width,
            height,
        )
    }

    /// Live attack rectangle, only while attacking and on an active frame
    pub fn attack_hitbox(&self) -> Option<Rect> {
        let kind = self.state.attack_kind()?;
        if !self.state.descriptor().is_active_frame(self.current_frame) {
            return None;
        }

        let half_width = ACTOR_WIDTH * self.scale / 2.0;
        let reach = kind.reach() * self.scale;
        let box_height = ATTACK_BOX_HEIGHT * self.scale;
        let center_y = self.position.y - ACTOR_HEIGHT * self.scale * ATTACK_BOX_LIFT;

        let x = match self.facing {
            Facing::Right => self.position.x + half_width,
            Facing::Left => self.position.x - half_width - reach,
        };
        Some(Rect::new(x, center_y - box_height / 2.0, reach, box_height))
    }

    /// Offer damage; ignored while invincible or dead
    ///
    /// `knockback_direction` is the horizontal push direction (normally ±1).
    pub fn apply_damage(&mut self, amount: u32, knockback_direction: f32) -> DamageOutcome {
        if self.is_dead() || self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.land_damage(amount, knockback_direction, true)
    }

    /// Area damage that lands every tick it is offered, invincible or not
    ///
    /// Dead actors still ignore it. Knockback is only applied when the actor
    /// was not already in a post-hit window, so a sustained ring does not
    /// stack impulses every tick.
    pub fn apply_area_damage(&mut self, amount: u32, knockback_direction: f32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        let fresh = !self.is_invincible();
        self.land_damage(amount, knockback_direction, fresh)
    }

    fn land_damage(&mut self, amount: u32, knockback_direction: f32, knockback: bool) -> DamageOutcome {
        self.health = self.health.saturating_sub(amount);
        let outcome = if self.health == 0 {
            self.set_animation_state(AnimationState::Dead);
            DamageOutcome::Killed
        } else {
            self.set_animation_state(AnimationState::Hit);
            DamageOutcome::Hit
        };

        self.state_timer = HIT_STUN_TICKS;
        self.invincibility_timer = HIT_INVINCIBILITY_TICKS;
        if knockback {
            self.velocity.x +=
                knockback_direction * KNOCKBACK_FORCE / self.scale.max(MIN_KNOCKBACK_SCALE);
        }

        outcome
    }

    /// The only way to change state
    ///
    /// Re-entering the current looping state is a no-op so a held walk does
    /// not restart its cycle every tick. Dead is terminal.
    pub fn set_animation_state(&mut self, next: AnimationState) {
        if next == self.state && self.state.descriptor().looping {
            return;
        }
        if self.is_dead() && next != AnimationState::Dead {
            return;
        }
        if next == AnimationState::Dead && self.health > 0 {
            // Health and state move together; dying goes through apply_damage
            return;
        }

        self.state = next;
        self.current_frame = 0;
        self.frame_tick = 0;
    }

    /// Advance timers, physics and the animation cursor by one tick
    pub fn tick(&mut self) {
        self.invincibility_timer = self.invincibility_timer.saturating_sub(1);

        if self.state_timer > 0 {
            self.state_timer -= 1;
            if self.state_timer == 0 && self.state == AnimationState::Hit {
                self.set_animation_state(AnimationState::Idle);
            }
        }

        if self.is_dead() {
            self.velocity = Vec2::ZERO;
        } else {
            self.position += self.velocity;
            self.velocity = self.velocity * VELOCITY_DAMPING;
        }

        self.advance_animation();
    }

    fn advance_animation(&mut self) {
        let desc = self.state.descriptor();
        self.frame_tick += 1;
        if self.frame_tick < desc.ticks_per_frame {
            return;
        }

        self.frame_tick = 0;
        if self.current_frame + 1 < desc.frame_count {
            self.current_frame += 1;
        } else if desc.looping {
            self.current_frame = 0;
        } else if self.is_dead() {
            // Clamp on the last frame and stay
        } else {
            self.set_animation_state(AnimationState::Idle);
        }
    }

    /// Keep the feet inside a rectangle of allowed positions
    pub fn clamp_position(&mut self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) {
        self.position.x = self.position.x.clamp(min_x, max_x);
        self.position.y = self.position.y.clamp(min_y, max_y);
    }
}
