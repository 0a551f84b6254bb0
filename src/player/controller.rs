//! Player controller: intent resolution on top of the shared Actor

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, AnimationState, AttackKind};
use crate::core::types::{ActorId, Facing, Vec2};
use crate::player::constants::{
    DODGE_INVINCIBILITY_TICKS, DODGE_SPEED_MULTIPLIER, PLAYER_MAX_HEALTH, PLAYER_SCALE,
    PLAYER_SPEED,
};
use crate::player::intent::{Intent, IntentSet};
use crate::player::special::SpecialAbility;

/// What the player ended up doing with this tick's intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Intents rejected or nothing asserted
    None,
    Moved,
    Attacked(AttackKind),
    Dodged,
    SpecialTriggered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    pub special: SpecialAbility,
}

impl Player {
    pub fn new(id: ActorId, position: Vec2) -> Self {
        let mut actor = Actor::new(id, position, PLAYER_MAX_HEALTH, PLAYER_SPEED, PLAYER_SCALE);
        actor.facing = Facing::Right;
        Self {
            actor,
            special: SpecialAbility::new(),
        }
    }

    /// Resolve one tick of intents
    ///
    /// Priority: Special > Dodge > Jab > Straight > movement. Only death
    /// blocks Special; a hit stun blocks everything else. Nothing else is
    /// accepted while the special is charging or active. Dodge may cancel an
    /// attack but not another dodge; attacks and movement wait for the
    /// current attack or dodge to finish.
    pub fn apply_intents(&mut self, intents: &IntentSet) -> PlayerAction {
        let state = self.actor.state();
        if state == AnimationState::Dead {
            return PlayerAction::None;
        }

        if intents.contains(Intent::Special) && self.special.try_trigger() {
            if state != AnimationState::Hit {
                self.actor.set_animation_state(AnimationState::Idle);
            }
            return PlayerAction::SpecialTriggered;
        }

        if state == AnimationState::Hit || self.special.is_busy() {
            return PlayerAction::None;
        }

        if intents.contains(Intent::Dodge) && state != AnimationState::Dodging {
            self.actor.set_animation_state(AnimationState::Dodging);
            self.actor.grant_invincibility(DODGE_INVINCIBILITY_TICKS);
            return PlayerAction::Dodged;
        }

        if state.is_attacking() || state == AnimationState::Dodging {
            return PlayerAction::None;
        }

        let attack = if intents.contains(Intent::Jab) {
            Some(AttackKind::Jab)
        } else if intents.contains(Intent::Straight) {
            Some(AttackKind::Straight)
        } else {
            None
        };
        if let Some(kind) = attack {
            self.actor.set_animation_state(kind.animation());
            return PlayerAction::Attacked(kind);
        }

        let direction = intents.movement_vector();
        if direction == Vec2::ZERO {
            self.actor.set_animation_state(AnimationState::Idle);
            return PlayerAction::None;
        }

        self.actor.position += direction * self.actor.speed;
        self.actor.facing = Facing::toward(direction.x, self.actor.facing);
        self.actor.set_animation_state(AnimationState::Walking);
        PlayerAction::Moved
    }

    /// Physics and ability step
    pub fn tick(&mut self) {
        if self.actor.state() == AnimationState::Dodging {
            let dash = self.actor.facing.sign() * self.actor.speed * DODGE_SPEED_MULTIPLIER;
            self.actor.position.x += dash;
        }
        self.actor.tick();
        self.special.tick();
    }

    pub fn is_dodging(&self) -> bool {
        self.actor.state() == AnimationState::Dodging
    }
}
