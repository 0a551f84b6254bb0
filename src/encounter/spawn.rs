//! Off-screen spawn placement

use rand::Rng;

use crate::core::config::EncounterConfig;
use crate::core::types::Vec2;
use crate::encounter::constants::SPAWN_OFFSCREEN_MARGIN;

/// Random side, random depth inside the floor band
pub fn grunt_spawn_position(config: &EncounterConfig, rng: &mut impl Rng) -> Vec2 {
    let x = if rng.gen_bool(0.5) {
        -SPAWN_OFFSCREEN_MARGIN
    } else {
        config.arena_width + SPAWN_OFFSCREEN_MARGIN
    };
    let y = rng.gen_range(config.floor_top..=config.floor_bottom);
    Vec2::new(x, y)
}

/// Bosses enter from the side the player is furthest from, mid-band
pub fn boss_spawn_position(config: &EncounterConfig, player_x: f32) -> Vec2 {
    let x = if player_x < config.arena_width / 2.0 {
        config.arena_width + SPAWN_OFFSCREEN_MARGIN
    } else {
        -SPAWN_OFFSCREEN_MARGIN
    };
    Vec2::new(x, (config.floor_top + config.floor_bottom) / 2.0)
}
