//! Enemy decision loop and defensive roll

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, AnimationState, AttackKind, ACTOR_HEIGHT};
use crate::core::types::{ActorId, Facing, Vec2};
use crate::enemy::boss::BossAbilities;
use crate::enemy::constants::*;
use crate::enemy::projectile::Projectile;

/// Chest height as a fraction of body height; volleys launch from here
const CAST_ORIGIN_LIFT: f32 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub actor: Actor,
    pub is_boss: bool,
    /// Decision ticks since the last attack roll
    pub ai_tick_counter: u32,
    /// Attack committed to at the end of the current wind-up
    pub next_attack: Option<AttackKind>,
    pub windup_remaining: u32,
    pub dodge_cooldown: u32,
    pub boss: Option<BossAbilities>,
}

impl Enemy {
    /// Regular enemy, stats scaled by the 1-based phase
    pub fn grunt(id: ActorId, position: Vec2, phase: u8) -> Self {
        let step = phase.max(1) - 1;
        let health = ENEMY_BASE_HEALTH + ENEMY_HEALTH_PER_PHASE * step as u32;
        let speed = ENEMY_BASE_SPEED + ENEMY_SPEED_PER_PHASE * step as f32;
        Self::with_actor(Actor::new(id, position, health, speed, ENEMY_SCALE), None)
    }

    /// Phase boss; the heavy variant (with volleys) from `HEAVY_BOSS_PHASE` on
    pub fn boss(id: ActorId, position: Vec2, phase: u8) -> Self {
        let actor = if phase >= HEAVY_BOSS_PHASE {
            Actor::new(id, position, HEAVY_BOSS_HEALTH, HEAVY_BOSS_SPEED, HEAVY_BOSS_SCALE)
        } else {
            Actor::new(id, position, BOSS_HEALTH, BOSS_SPEED, BOSS_SCALE)
        };
        let heavy = actor.max_health() >= HEAVY_BOSS_HEALTH;
        Self::with_actor(actor, Some(BossAbilities::new(heavy)))
    }

    fn with_actor(actor: Actor, boss: Option<BossAbilities>) -> Self {
        Self {
            actor,
            is_boss: boss.is_some(),
            ai_tick_counter: 0,
            next_attack: None,
            windup_remaining: 0,
            dodge_cooldown: 0,
            boss,
        }
    }

    fn attack_interval(&self) -> u32 {
        if self.is_boss {
            BOSS_ATTACK_INTERVAL_TICKS
        } else {
            ATTACK_INTERVAL_TICKS
        }
    }

    fn dodge_chance(&self) -> f64 {
        if self.is_boss {
            BOSS_DODGE_CHANCE
        } else {
            DODGE_CHANCE
        }
    }

    /// Free to pick a new action this tick
    pub fn can_decide(&self) -> bool {
        let state = self.actor.state();
        let committed = matches!(
            state,
            AnimationState::Hit
                | AnimationState::Dead
                | AnimationState::Dodging
                | AnimationState::WindUp
        ) || state.is_attacking();
        let boss_busy = self.boss.as_ref().is_some_and(|b| b.is_engaged());
        !committed && !boss_busy
    }

    /// One step of the decision loop toward `target`
    ///
    /// Priority: heavy-boss volley, boss blast, approach, then hold and
    /// periodically telegraph an attack.
    pub fn decide(&mut self, target: Vec2, rng: &mut impl Rng) {
        if !self.can_decide() {
            return;
        }
        self.ai_tick_counter += 1;

        let to_target = target - self.actor.position;
        let distance = to_target.length();
        self.actor.facing = Facing::toward(to_target.x, self.actor.facing);

        if let Some(boss) = &mut self.boss {
            if let Some(volley) = &mut boss.volley {
                if volley.is_ready() && distance > VOLLEY_MIN_DISTANCE && rng.gen_bool(VOLLEY_CHANCE)
                {
                    volley.try_begin();
                    self.actor.set_animation_state(AnimationState::Idle);
                    tracing::debug!(enemy = ?self.actor.id, "boss begins projectile volley");
                    return;
                }
            }
            if boss.blast.is_ready() && distance < BLAST_TRIGGER_DISTANCE && rng.gen_bool(BLAST_CHANCE)
            {
                boss.blast.try_begin();
                self.actor.set_animation_state(AnimationState::Idle);
                tracing::debug!(enemy = ?self.actor.id, "boss charges area blast");
                return;
            }
        }

        if distance > ENGAGE_DISTANCE * self.actor.scale {
            // The attack interval counts ticks spent holding in range
            self.ai_tick_counter = 0;
            self.actor.position += to_target.normalize() * self.actor.speed;
            self.actor.set_animation_state(AnimationState::Walking);
            return;
        }

        self.actor.set_animation_state(AnimationState::Idle);
        if self.ai_tick_counter >= self.attack_interval() {
            self.ai_tick_counter = 0;
            let kind = if rng.gen_bool(STRAIGHT_CHANCE) {
                AttackKind::Straight
            } else {
                AttackKind::Jab
            };
            self.next_attack = Some(kind);
            self.windup_remaining = WINDUP_TICKS;
            self.actor.set_animation_state(AnimationState::WindUp);
        }
    }

    /// Defensive roll against an incoming attack
    ///
    /// Returns true when the enemy dodged; on false the caller applies damage.
    pub fn try_dodge(&mut self, rng: &mut impl Rng) -> bool {
        if !self.actor.is_alive()
            || self.actor.state() == AnimationState::Dodging
            || self.dodge_cooldown > 0
        {
            return false;
        }
        if !rng.gen_bool(self.dodge_chance()) {
            return false;
        }

        self.actor.set_animation_state(AnimationState::Dodging);
        self.actor.grant_invincibility(ENEMY_DODGE_TICKS);
        self.actor.velocity.x -= self.actor.facing.sign() * ENEMY_DODGE_IMPULSE;
        self.dodge_cooldown = ENEMY_DODGE_COOLDOWN_TICKS;
        self.next_attack = None;
        self.windup_remaining = 0;
        true
    }

    /// Physics, telegraph countdown and boss abilities
    ///
    /// `target` is the point projectiles aim and home at.
    pub fn tick(&mut self, target: Vec2) {
        self.dodge_cooldown = self.dodge_cooldown.saturating_sub(1);

        if self.actor.state() == AnimationState::WindUp {
            self.windup_remaining = self.windup_remaining.saturating_sub(1);
            if self.windup_remaining == 0 {
                match self.next_attack.take() {
                    Some(kind) => self.actor.set_animation_state(kind.animation()),
                    None => self.actor.set_animation_state(AnimationState::Idle),
                }
            }
        } else if self.next_attack.is_some() {
            // Wind-up was interrupted (hit or dodge)
            self.next_attack = None;
            self.windup_remaining = 0;
        }

        self.actor.tick();

        let origin = self.cast_origin();
        let alive = self.actor.is_alive();
        if let Some(boss) = &mut self.boss {
            boss.tick(origin, target, alive);
        }
    }

    fn cast_origin(&self) -> Vec2 {
        let lift = ACTOR_HEIGHT * self.actor.scale * CAST_ORIGIN_LIFT;
        Vec2::new(self.actor.position.x, self.actor.position.y - lift)
    }

    /// Current blast radius if the blast is live
    pub fn active_blast_radius(&self) -> Option<f32> {
        self.boss
            .as_ref()
            .filter(|b| b.blast.is_active())
            .map(|b| b.blast.radius)
    }

    /// Live projectiles (empty for anything but a heavy boss)
    pub fn projectiles(&self) -> &[Projectile] {
        self.boss.as_ref().map(|b| b.projectiles()).unwrap_or(&[])
    }
}
