//! Actor constants - physics, hit reaction and geometry tunables
//!
//! Tick counts assume one tick per screen refresh (~60 Hz).

// Body geometry at scale 1.0 (arena units)
pub const ACTOR_WIDTH: f32 = 40.0;
pub const ACTOR_HEIGHT: f32 = 90.0;

// Attack geometry at scale 1.0
pub const JAB_REACH: f32 = 45.0;
pub const STRAIGHT_REACH: f32 = 70.0;
pub const ATTACK_BOX_HEIGHT: f32 = 24.0;
/// Attack box vertical center, as a fraction of body height above the feet
pub const ATTACK_BOX_LIFT: f32 = 0.75;

// Hit reaction windows
pub const HIT_STUN_TICKS: u32 = 15;
pub const HIT_INVINCIBILITY_TICKS: u32 = 30;

// Physics
pub const VELOCITY_DAMPING: f32 = 0.8;
pub const KNOCKBACK_FORCE: f32 = 7.0;
/// Knockback divides by scale; this floor keeps tiny actors finite
pub const MIN_KNOCKBACK_SCALE: f32 = 0.25;
