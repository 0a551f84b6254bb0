//! Hit tests used by the director's collision passes

use crate::actor::AttackKind;
use crate::core::types::{Rect, Vec2};
use crate::encounter::constants::{JAB_DAMAGE, PLAYER_ANCHOR_LIFT, STRAIGHT_DAMAGE};

/// Damage a player melee attack deals
pub fn attack_damage(kind: AttackKind) -> u32 {
    match kind {
        AttackKind::Jab => JAB_DAMAGE,
        AttackKind::Straight => STRAIGHT_DAMAGE,
    }
}

/// Rectangle overlap (half-open on both axes)
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Euclidean circle test, inclusive at the rim
pub fn within_radius(center: Vec2, point: Vec2, radius: f32) -> bool {
    center.distance(&point) <= radius
}

/// Point above the player's feet that projectiles aim and collide at
pub fn player_anchor(feet: Vec2) -> Vec2 {
    Vec2::new(feet.x, feet.y - PLAYER_ANCHOR_LIFT)
}

/// Horizontal push direction from `from` toward `to`, falling back to `fallback`
pub fn push_direction(from: Vec2, to: Vec2, fallback: f32) -> f32 {
    let dx = to.x - from.x;
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else {
        fallback
    }
}
