//! Encounter layer
//!
//! The director owns the player, the enemy roster and all session state, and
//! advances them in a fixed order each tick. Collisions, scoring, phase
//! gating, spawn placement and theme selection live in their own modules so
//! they can be tested without a full session.

pub mod collision;
pub mod constants;
pub mod director;
pub mod events;
pub mod phase;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod theme;

pub use director::Director;
pub use events::{EncounterEvent, EncounterEventKind, EncounterEventLog, HitSource};
pub use phase::{is_boss_phase, PhaseGate, PhaseProgress, SessionOutcome};
pub use score::{multiplier_for, ScoreTracker};
pub use snapshot::{ActorView, EncounterSnapshot};
pub use theme::{select_theme, MusicTheme};
