//! Enemy constants - AI cadence, roll probabilities and boss ability tuning

// Regular enemies (scaled by phase, see `Enemy::grunt`)
pub const ENEMY_BASE_HEALTH: u32 = 30;
pub const ENEMY_HEALTH_PER_PHASE: u32 = 5;
pub const ENEMY_BASE_SPEED: f32 = 1.5;
pub const ENEMY_SPEED_PER_PHASE: f32 = 0.15;
pub const ENEMY_SCALE: f32 = 1.0;

// Bosses
pub const BOSS_HEALTH: u32 = 300;
pub const BOSS_SCALE: f32 = 1.6;
pub const BOSS_SPEED: f32 = 1.3;
/// Bosses at or above this max health also cast projectile volleys
pub const HEAVY_BOSS_HEALTH: u32 = 500;
pub const HEAVY_BOSS_SCALE: f32 = 2.0;
pub const HEAVY_BOSS_SPEED: f32 = 1.1;
/// First phase whose boss is the heavy variant
pub const HEAVY_BOSS_PHASE: u8 = 5;

// Decision loop
/// Closing distance at scale 1.0; below this the enemy stops and attacks
pub const ENGAGE_DISTANCE: f32 = 80.0;
pub const ATTACK_INTERVAL_TICKS: u32 = 40;
pub const BOSS_ATTACK_INTERVAL_TICKS: u32 = 20;
pub const STRAIGHT_CHANCE: f64 = 0.6;
pub const WINDUP_TICKS: u32 = 15;

// Defensive roll
pub const DODGE_CHANCE: f64 = 0.12;
pub const BOSS_DODGE_CHANCE: f64 = 0.35;
pub const ENEMY_DODGE_TICKS: u32 = 25;
pub const ENEMY_DODGE_COOLDOWN_TICKS: u32 = 120;
/// Backstep impulse applied on a successful dodge
pub const ENEMY_DODGE_IMPULSE: f32 = 6.0;

// Boss area blast
pub const BLAST_TRIGGER_DISTANCE: f32 = 180.0;
pub const BLAST_CHANCE: f64 = 0.02;
pub const BLAST_CHARGE_TICKS: u32 = 60;
pub const BLAST_ACTIVE_TICKS: u32 = 60;
pub const BLAST_COOLDOWN_TICKS: u32 = 350;
pub const BLAST_MAX_RADIUS: f32 = 200.0;

// Boss projectile volley
pub const VOLLEY_MIN_DISTANCE: f32 = 150.0;
pub const VOLLEY_CHANCE: f64 = 0.02;
pub const VOLLEY_CAST_TICKS: u32 = 60;
pub const VOLLEY_SHOT_INTERVAL_TICKS: u32 = 20;
pub const VOLLEY_SHOTS: u32 = 3;
pub const VOLLEY_COOLDOWN_TICKS: u32 = 450;

// Projectiles
pub const PROJECTILE_SPEED: f32 = 5.0;
pub const PROJECTILE_LIFETIME_TICKS: u32 = 140;
pub const PROJECTILE_STRAIGHT_TICKS: u32 = 60;
pub const PROJECTILE_VELOCITY_DECAY: f32 = 0.96;
/// Per-tick pull toward the target once homing; settles at pull / (1 - decay)
pub const PROJECTILE_HOMING_PULL: f32 = 0.2;
pub const PROJECTILE_HIT_RADIUS: f32 = 25.0;
