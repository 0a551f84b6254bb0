//! Player constants - movement, dodge and special-ability tunables

pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_SPEED: f32 = 4.0;
pub const PLAYER_SCALE: f32 = 1.0;

// Dodge: its own invincibility window, separate from hit invincibility
pub const DODGE_INVINCIBILITY_TICKS: u32 = 35;
pub const DODGE_SPEED_MULTIPLIER: f32 = 2.8;

// Special ability lifecycle (charge -> active, cooldown runs alongside)
pub const SPECIAL_CHARGE_TICKS: u32 = 45;
pub const SPECIAL_ACTIVE_TICKS: u32 = 60;
pub const SPECIAL_COOLDOWN_TICKS: u32 = 900; // ~15 s at 60 Hz
pub const SPECIAL_MAX_RADIUS: f32 = 260.0;
