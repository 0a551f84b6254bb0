//! Boss projectiles: straight flight, then homing, then expiry

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::enemy::constants::{
    PROJECTILE_HOMING_PULL, PROJECTILE_LIFETIME_TICKS, PROJECTILE_SPEED,
    PROJECTILE_STRAIGHT_TICKS, PROJECTILE_VELOCITY_DECAY,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub remaining_life: u32,
}

impl Projectile {
    /// Launch from `origin` aimed at where `target` is right now
    pub fn aimed(origin: Vec2, target: Vec2) -> Self {
        let mut direction = (target - origin).normalize();
        if direction == Vec2::ZERO {
            direction = Vec2::new(1.0, 0.0);
        }
        Self {
            position: origin,
            velocity: direction * PROJECTILE_SPEED,
            remaining_life: PROJECTILE_LIFETIME_TICKS,
        }
    }

    /// Ticks flown so far
    pub fn age(&self) -> u32 {
        PROJECTILE_LIFETIME_TICKS.saturating_sub(self.remaining_life)
    }

    pub fn is_homing(&self) -> bool {
        self.age() >= PROJECTILE_STRAIGHT_TICKS
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_life == 0
    }

    /// Fly one tick; homes on `target` once past the straight window
    pub fn tick(&mut self, target: Vec2) {
        if self.is_expired() {
            return;
        }
        if self.is_homing() {
            let pull = (target - self.position).normalize() * PROJECTILE_HOMING_PULL;
            self.velocity = self.velocity * PROJECTILE_VELOCITY_DECAY + pull;
        }
        self.position += self.velocity;
        self.remaining_life -= 1;
    }

    pub fn hits(&self, point: Vec2, radius: f32) -> bool {
        self.position.distance(&point) <= radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aimed_at_target_with_fixed_speed() {
        let p = Projectile::aimed(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));
        assert!((p.velocity.length() - PROJECTILE_SPEED).abs() < 0.0001);
        assert!(p.velocity.x > 0.0 && p.velocity.y > 0.0);
    }

    #[test]
    fn test_straight_then_homing() {
        let mut p = Projectile::aimed(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        let initial = p.velocity;
        // Target moved off the original line
        let target = Vec2::new(100.0, 300.0);
        for _ in 0..PROJECTILE_STRAIGHT_TICKS {
            p.tick(target);
        }
        assert_eq!(p.velocity, initial);
        p.tick(target);
        assert_ne!(p.velocity, initial);
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut p = Projectile::aimed(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        for _ in 0..PROJECTILE_LIFETIME_TICKS - 1 {
            p.tick(Vec2::new(500.0, 0.0));
        }
        assert!(!p.is_expired());
        p.tick(Vec2::new(500.0, 0.0));
        assert!(p.is_expired());
        let frozen = p.position;
        p.tick(Vec2::new(500.0, 0.0));
        assert_eq!(p.position, frozen);
    }

    #[test]
    fn test_zero_length_aim_still_moves() {
        let p = Projectile::aimed(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert!(p.velocity.length() > 0.0);
    }

    #[test]
    fn test_hits_within_radius() {
        let p = Projectile::aimed(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(p.hits(Vec2::new(20.0, 15.0), 25.0));
        assert!(!p.hits(Vec2::new(20.0, 16.0), 25.0));
    }
}
