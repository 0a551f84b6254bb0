//! Actors - the shared combatant record behind the player and every enemy
//!
//! Position, health, facing, timers and the animation-driven state machine
//! live here once; `Player` and `Enemy` compose an `Actor` rather than
//! duplicating any of it.

pub mod animation;
pub mod constants;
pub mod model;

pub use animation::{animation_table, AnimationDescriptor, AnimationState, AttackKind};
pub use constants::*;
pub use model::{Actor, DamageOutcome};
