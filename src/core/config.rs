//! Encounter configuration
//!
//! Arena geometry, phase thresholds and population targets. Per-behaviour
//! tuning (timers, damage, roll probabilities) lives in each domain's
//! `constants.rs` and is not runtime-configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BrawlError, Result};

/// Number of escalating phases in a session
pub const PHASE_COUNT: usize = 5;

/// Configuration for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Seed for the shared deterministic RNG
    pub seed: u64,

    /// Logical arena width (arena units, independent of display scaling)
    pub arena_width: f32,

    /// Logical arena height
    pub arena_height: f32,

    /// Top of the walkable floor band
    ///
    /// Actor `position` is the bottom-center of the body, so this is the
    /// furthest "back" an actor's feet can stand.
    pub floor_top: f32,

    /// Bottom of the walkable floor band
    pub floor_bottom: f32,

    /// Chaos-score threshold gating each phase (index 0 = phase 1)
    ///
    /// Phases 3 and 5 spawn their boss when the threshold is met; every other
    /// phase opens a transition window instead.
    pub phase_targets: [u32; PHASE_COUNT],

    /// Living enemy target before `late_population_phase`
    pub base_population: usize,

    /// Living enemy target from `late_population_phase` on
    pub late_population: usize,

    /// First phase that uses `late_population`
    pub late_population_phase: u8,

    /// Health restored to the player when a transition completes
    pub transition_heal: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_width: 800.0,
            arena_height: 600.0,
            floor_top: 330.0,
            floor_bottom: 580.0,
            phase_targets: [100, 250, 500, 800, 1200],
            base_population: 3,
            late_population: 5,
            late_population_phase: 3,
            transition_heal: 50,
        }
    }
}

impl EncounterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EncounterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Chaos-score threshold for a 1-based phase (clamped to the last phase)
    pub fn phase_target(&self, phase: u8) -> u32 {
        let idx = (phase.max(1) as usize - 1).min(PHASE_COUNT - 1);
        self.phase_targets[idx]
    }

    /// Score a phase must earn on its own: the gap to the previous threshold
    pub fn phase_quota(&self, phase: u8) -> u32 {
        let phase = phase.max(1);
        if phase == 1 {
            self.phase_target(1)
        } else {
            self.phase_target(phase).saturating_sub(self.phase_target(phase - 1))
        }
    }

    /// Living enemy target for a 1-based phase
    pub fn population_target(&self, phase: u8) -> usize {
        if phase >= self.late_population_phase {
            self.late_population
        } else {
            self.base_population
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(BrawlError::InvalidConfig(format!(
                "arena must have positive size, got {}x{}",
                self.arena_width, self.arena_height
            )));
        }

        if self.floor_top >= self.floor_bottom
            || self.floor_top < 0.0
            || self.floor_bottom > self.arena_height
        {
            return Err(BrawlError::InvalidConfig(format!(
                "floor band [{}, {}] must be non-empty and inside the arena height {}",
                self.floor_top, self.floor_bottom, self.arena_height
            )));
        }

        if self.phase_targets[0] == 0 || self.phase_targets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BrawlError::InvalidConfig(format!(
                "phase_targets must be positive and strictly increasing, got {:?}",
                self.phase_targets
            )));
        }

        if self.base_population == 0 || self.late_population == 0 {
            return Err(BrawlError::InvalidConfig(
                "population targets must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
