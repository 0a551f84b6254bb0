//! Enemies - approach/telegraph/attack AI, defensive rolls and boss abilities

pub mod ai;
pub mod boss;
pub mod constants;
pub mod projectile;

pub use ai::Enemy;
pub use boss::{BlastAbility, BlastPhase, BossAbilities, ProjectileVolley, VolleyPhase};
pub use constants::*;
pub use projectile::Projectile;
