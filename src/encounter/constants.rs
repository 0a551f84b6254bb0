//! Encounter constants - damage table, scoring and progression tunables

// Damage dealt by the player
pub const JAB_DAMAGE: u32 = 9;
pub const STRAIGHT_DAMAGE: u32 = 18;
pub const SPECIAL_DAMAGE: u32 = 15;

// Damage dealt to the player
pub const ENEMY_MELEE_DAMAGE: u32 = 6;
pub const BLAST_DAMAGE: u32 = 10;
pub const PROJECTILE_DAMAGE: u32 = 15;

/// Global freeze after the player lands a melee hit
pub const HITSTOP_TICKS: u32 = 8;

// Scoring
pub const GRUNT_POINTS: u64 = 20;
pub const BOSS_POINTS: u64 = 750;
pub const MAX_MULTIPLIER: u32 = 10;
/// Consecutive landed hits per multiplier step
pub const STREAK_PER_MULTIPLIER_STEP: u32 = 5;

// Progression
pub const BOSS_PHASES: [u8; 2] = [3, 5];
pub const SPECIAL_UNLOCK_PHASE: u8 = 3;
pub const FINAL_PHASE: u8 = 5;

// Arena geometry
/// Projectiles aim this far above the player's feet
pub const PLAYER_ANCHOR_LIFT: f32 = 40.0;
/// Distance from the far edge that counts as reaching it; also the re-entry x
pub const EDGE_MARGIN: f32 = 40.0;
/// How far outside the arena enemies appear
pub const SPAWN_OFFSCREEN_MARGIN: f32 = 40.0;
pub const PLAYER_START_X: f32 = 120.0;
