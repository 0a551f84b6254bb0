//! Player - intent resolution, dodge, the unlockable special and autopilots

pub mod autopilot;
pub mod constants;
pub mod controller;
pub mod intent;
pub mod special;

pub use autopilot::{Autopilot, AutopilotPolicy};
pub use constants::*;
pub use controller::{Player, PlayerAction};
pub use intent::{Intent, IntentSet};
pub use special::{SpecialAbility, SpecialPhase};
