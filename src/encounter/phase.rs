//! Phase progression state and the chaos-threshold gate

use serde::{Deserialize, Serialize};

use crate::core::config::EncounterConfig;
use crate::encounter::constants::{BOSS_PHASES, FINAL_PHASE};

/// Whether `phase` ends in a boss fight rather than a transition window
pub fn is_boss_phase(phase: u8) -> bool {
    BOSS_PHASES.contains(&phase)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionOutcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

impl SessionOutcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, SessionOutcome::InProgress)
    }
}

/// What the phase check wants the director to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseGate {
    Hold,
    SpawnBoss,
    OpenTransition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseProgress {
    /// 1-based
    pub current_phase: u8,
    pub phase_transitioning: bool,
    pub boss_active: bool,
    pub outcome: SessionOutcome,
    /// Chaos score when the current phase began
    pub phase_start_score: u64,
}

impl Default for PhaseProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseProgress {
    pub fn new() -> Self {
        Self {
            current_phase: 1,
            phase_transitioning: false,
            boss_active: false,
            outcome: SessionOutcome::InProgress,
            phase_start_score: 0,
        }
    }

    pub fn is_final_phase(&self) -> bool {
        self.current_phase >= FINAL_PHASE
    }

    /// Score that closes the current phase
    ///
    /// The configured threshold, raised when the phase was entered with a
    /// score already past it so every phase still has to earn its quota.
    pub fn effective_target(&self, config: &EncounterConfig) -> u64 {
        let threshold = config.phase_target(self.current_phase) as u64;
        let quota = config.phase_quota(self.current_phase) as u64;
        threshold.max(self.phase_start_score + quota)
    }

    /// Threshold check, evaluated only when no transition or boss is in flight
    pub fn gate(&self, chaos_score: u64, config: &EncounterConfig) -> PhaseGate {
        if self.outcome.is_decided() || self.phase_transitioning || self.boss_active {
            return PhaseGate::Hold;
        }
        if chaos_score < self.effective_target(config) {
            return PhaseGate::Hold;
        }
        if is_boss_phase(self.current_phase) {
            PhaseGate::SpawnBoss
        } else {
            PhaseGate::OpenTransition
        }
    }

    pub fn open_transition(&mut self) {
        self.phase_transitioning = true;
    }

    pub fn complete_transition(&mut self, chaos_score: u64) {
        self.phase_transitioning = false;
        self.current_phase = (self.current_phase + 1).min(FINAL_PHASE);
        self.phase_start_score = chaos_score;
    }
}
