//! Encounter events
//!
//! Everything the presentation layer reacts to (sound, flashes, HUD popups)
//! is reported here instead of through callbacks.

use serde::{Deserialize, Serialize};

use crate::actor::AttackKind;
use crate::core::types::{ActorId, Tick};
use crate::encounter::theme::MusicTheme;

/// What damaged the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    Melee(ActorId),
    Blast(ActorId),
    Projectile(ActorId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEventKind {
    HitLanded {
        target: ActorId,
        attack: AttackKind,
        damage: u32,
        killed: bool,
    },
    EnemyDodged {
        enemy: ActorId,
    },
    SpecialTriggered,
    SpecialDamage {
        target: ActorId,
        damage: u32,
        killed: bool,
    },
    PlayerHit {
        source: HitSource,
        damage: u32,
    },
    EnemyDefeated {
        enemy: ActorId,
        boss: bool,
        points: u64,
    },
    BossSpawned {
        boss: ActorId,
        phase: u8,
    },
    SpecialUnlocked,
    PhaseTransitionStarted {
        phase: u8,
    },
    PhaseAdvanced {
        phase: u8,
    },
    ThemeChanged {
        theme: MusicTheme,
    },
    Victory,
    Defeat,
    Paused,
    Resumed,
    Restarted,
}

impl EncounterEventKind {
    /// Stable short name, used for summaries
    pub fn name(&self) -> &'static str {
        match self {
            EncounterEventKind::HitLanded { .. } => "hit_landed",
            EncounterEventKind::EnemyDodged { .. } => "enemy_dodged",
            EncounterEventKind::SpecialTriggered => "special_triggered",
            EncounterEventKind::SpecialDamage { .. } => "special_damage",
            EncounterEventKind::PlayerHit { .. } => "player_hit",
            EncounterEventKind::EnemyDefeated { .. } => "enemy_defeated",
            EncounterEventKind::BossSpawned { .. } => "boss_spawned",
            EncounterEventKind::SpecialUnlocked => "special_unlocked",
            EncounterEventKind::PhaseTransitionStarted { .. } => "phase_transition_started",
            EncounterEventKind::PhaseAdvanced { .. } => "phase_advanced",
            EncounterEventKind::ThemeChanged { .. } => "theme_changed",
            EncounterEventKind::Victory => "victory",
            EncounterEventKind::Defeat => "defeat",
            EncounterEventKind::Paused => "paused",
            EncounterEventKind::Resumed => "resumed",
            EncounterEventKind::Restarted => "restarted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEvent {
    pub tick: Tick,
    pub kind: EncounterEventKind,
}

/// Ordered events produced by one or more ticks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterEventLog {
    pub events: Vec<EncounterEvent>,
}

impl EncounterEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, kind: EncounterEventKind) {
        self.events.push(EncounterEvent { tick, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EncounterEvent> {
        self.events.iter()
    }

    pub fn contains(&self, predicate: impl Fn(&EncounterEventKind) -> bool) -> bool {
        self.events.iter().any(|e| predicate(&e.kind))
    }

    pub fn count(&self, predicate: impl Fn(&EncounterEventKind) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(&e.kind)).count()
    }

    /// Append another log, preserving order
    pub fn extend(&mut self, other: EncounterEventLog) {
        self.events.extend(other.events);
    }
}
