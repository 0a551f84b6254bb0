//! Scripted intent sources for headless runs and soak tests

use serde::{Deserialize, Serialize};

use crate::actor::AnimationState;
use crate::core::types::Facing;
use crate::encounter::snapshot::{ActorView, EncounterSnapshot};
use crate::player::intent::{Intent, IntentSet};
use crate::player::special::SpecialPhase;

/// Horizontal gap at which the brawler stops walking and swings
const STRIKE_RANGE: f32 = 55.0;
/// Depth misalignment tolerated before lining up vertically
const LANE_TOLERANCE: f32 = 8.0;
/// Wind-ups closer than this get dodged
const DODGE_RANGE: f32 = 110.0;
const SPECIAL_RANGE: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum AutopilotPolicy {
    /// Never asserts anything
    #[default]
    Idle,
    /// Walks up to the nearest enemy and fights
    Brawler,
}

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pub policy: AutopilotPolicy,
    swings: u32,
}

impl Autopilot {
    pub fn new(policy: AutopilotPolicy) -> Self {
        Self { policy, swings: 0 }
    }

    /// Intents for the next tick given the current snapshot
    pub fn next_intents(&mut self, snapshot: &EncounterSnapshot) -> IntentSet {
        match self.policy {
            AutopilotPolicy::Idle => IntentSet::empty(),
            AutopilotPolicy::Brawler => self.brawl(snapshot),
        }
    }

    fn brawl(&mut self, snapshot: &EncounterSnapshot) -> IntentSet {
        let mut intents = IntentSet::empty();
        if snapshot.victory || snapshot.defeated || snapshot.paused {
            return intents;
        }

        let me = &snapshot.player;
        let Some(target) = nearest(me, snapshot.alive_enemies()) else {
            if snapshot.phase_transitioning {
                intents.insert(Intent::MoveRight);
            }
            return intents;
        };

        let dx = target.position.x - me.position.x;
        let dy = target.position.y - me.position.y;

        let special_ready = snapshot.special_unlocked
            && snapshot.special_phase == SpecialPhase::Idle
            && snapshot.special_cooldown_fraction <= 0.0;
        if special_ready && dx.hypot(dy) <= SPECIAL_RANGE {
            return intents.with(Intent::Special);
        }

        if target.state == AnimationState::WindUp && dx.abs() <= DODGE_RANGE * target.scale {
            return intents.with(Intent::Dodge);
        }

        let facing_target = match me.facing {
            Facing::Right => dx >= 0.0,
            Facing::Left => dx <= 0.0,
        };
        let lined_up = dy.abs() <= LANE_TOLERANCE;

        if dx.abs() <= STRIKE_RANGE * target.scale.max(1.0) && facing_target && lined_up {
            self.swings += 1;
            let attack = if self.swings % 2 == 0 {
                Intent::Straight
            } else {
                Intent::Jab
            };
            return intents.with(attack);
        }

        if dx.abs() > STRIKE_RANGE / 2.0 || !facing_target {
            intents.insert(if dx < 0.0 {
                Intent::MoveLeft
            } else {
                Intent::MoveRight
            });
        }
        if !lined_up {
            intents.insert(if dy < 0.0 {
                Intent::MoveUp
            } else {
                Intent::MoveDown
            });
        }
        intents
    }
}

fn nearest<'a>(
    me: &ActorView,
    enemies: impl Iterator<Item = &'a ActorView>,
) -> Option<&'a ActorView> {
    enemies.min_by(|a, b| {
        let da = me.position.distance(&a.position);
        let db = me.position.distance(&b.position);
        da.total_cmp(&db)
    })
}
