//! Music theme selection

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTheme {
    /// Phases 1-2
    Brawl,
    /// Phases 3-4
    Escalation,
    /// Phase 5
    Finale,
    Boss,
    Victory,
    Defeat,
    Paused,
}

/// Theme for the current session state
///
/// Priority: Paused > Defeat > Victory > Boss > phase band.
pub fn select_theme(
    phase: u8,
    boss_active: bool,
    victory: bool,
    defeated: bool,
    paused: bool,
) -> MusicTheme {
    if paused {
        MusicTheme::Paused
    } else if defeated {
        MusicTheme::Defeat
    } else if victory {
        MusicTheme::Victory
    } else if boss_active {
        MusicTheme::Boss
    } else {
        match phase {
            0..=2 => MusicTheme::Brawl,
            3 | 4 => MusicTheme::Escalation,
            _ => MusicTheme::Finale,
        }
    }
}
