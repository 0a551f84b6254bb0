//! Animation states and their static descriptors
//!
//! The descriptor table is the sole authority on whether an attack is live:
//! a hitbox exists only on the frames listed in `active_frames`.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::actor::constants::{JAB_REACH, STRAIGHT_REACH};

/// Finite animation-state machine shared by every actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
    AttackJab,
    AttackStraight,
    WindUp,
    Dodging,
    Hit,
    Dead,
}

impl AnimationState {
    pub const ALL: [AnimationState; 8] = [
        AnimationState::Idle,
        AnimationState::Walking,
        AnimationState::AttackJab,
        AnimationState::AttackStraight,
        AnimationState::WindUp,
        AnimationState::Dodging,
        AnimationState::Hit,
        AnimationState::Dead,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Static descriptor for this state
    pub fn descriptor(self) -> &'static AnimationDescriptor {
        &animation_table().descriptors[self.index()]
    }

    /// The attack this state performs, if it is an attacking state
    pub fn attack_kind(self) -> Option<AttackKind> {
        match self {
            AnimationState::AttackJab => Some(AttackKind::Jab),
            AnimationState::AttackStraight => Some(AttackKind::Straight),
            _ => None,
        }
    }

    pub fn is_attacking(self) -> bool {
        self.attack_kind().is_some()
    }
}

/// Melee attack types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Jab,
    Straight,
}

impl AttackKind {
    pub fn animation(self) -> AnimationState {
        match self {
            AttackKind::Jab => AnimationState::AttackJab,
            AttackKind::Straight => AnimationState::AttackStraight,
        }
    }

    /// Horizontal reach at scale 1.0
    pub fn reach(self) -> f32 {
        match self {
            AttackKind::Jab => JAB_REACH,
            AttackKind::Straight => STRAIGHT_REACH,
        }
    }
}

/// Frame layout of one animation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDescriptor {
    pub frame_count: u8,
    /// Ticks spent on each frame before advancing
    pub ticks_per_frame: u8,
    pub looping: bool,
    /// Frames on which an attack hitbox is live (empty for non-attacks)
    pub active_frames: &'static [u8],
}

impl AnimationDescriptor {
    fn new(frame_count: u8, ticks_per_frame: u8, looping: bool) -> Self {
        Self {
            frame_count,
            ticks_per_frame,
            looping,
            active_frames: &[],
        }
    }

    fn with_active(mut self, frames: &'static [u8]) -> Self {
        self.active_frames = frames;
        self
    }

    pub fn is_active_frame(&self, frame: u8) -> bool {
        self.active_frames.contains(&frame)
    }

    /// Ticks a one-shot takes to play through once
    pub fn total_ticks(&self) -> u32 {
        self.frame_count as u32 * self.ticks_per_frame as u32
    }
}

/// Read-only descriptor map keyed by `AnimationState`
#[derive(Debug)]
pub struct AnimationTable {
    descriptors: [AnimationDescriptor; 8],
}

impl AnimationTable {
    fn reference() -> Self {
        let descriptors = AnimationState::ALL.map(|state| match state {
            AnimationState::Idle => AnimationDescriptor::new(4, 8, true),
            AnimationState::Walking => AnimationDescriptor::new(6, 6, true),
            AnimationState::AttackJab => AnimationDescriptor::new(4, 4, false).with_active(&[1, 2]),
            AnimationState::AttackStraight => {
                AnimationDescriptor::new(5, 5, false).with_active(&[2, 3])
            }
            // Loops so the telegraph timer, not the animation, decides when it ends
            AnimationState::WindUp => AnimationDescriptor::new(3, 5, true),
            AnimationState::Dodging => AnimationDescriptor::new(5, 5, false),
            AnimationState::Hit => AnimationDescriptor::new(3, 5, false),
            AnimationState::Dead => AnimationDescriptor::new(3, 5, false),
        });
        Self { descriptors }
    }
}

static ANIMATIONS: OnceLock<AnimationTable> = OnceLock::new();

/// Global animation table (built on first access, never mutated)
pub fn animation_table() -> &'static AnimationTable {
    ANIMATIONS.get_or_init(AnimationTable::reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_attacks_have_active_frames() {
        for state in AnimationState::ALL {
            let has_active = !state.descriptor().active_frames.is_empty();
            assert_eq!(has_active, state.is_attacking(), "{:?}", state);
        }
    }

    #[test]
    fn test_active_frames_within_frame_count() {
        for state in AnimationState::ALL {
            let desc = state.descriptor();
            assert!(desc.active_frames.iter().all(|&f| f < desc.frame_count));
            assert!(desc.ticks_per_frame > 0);
        }
    }

    #[test]
    fn test_jab_descriptor() {
        let jab = AnimationState::AttackJab.descriptor();
        assert_eq!(jab.frame_count, 4);
        assert!(!jab.looping);
        assert!(!jab.is_active_frame(0));
        assert!(jab.is_active_frame(1));
        assert!(jab.is_active_frame(2));
        assert!(!jab.is_active_frame(3));
    }

    #[test]
    fn test_attack_kind_round_trips_through_state() {
        for kind in [AttackKind::Jab, AttackKind::Straight] {
            assert_eq!(kind.animation().attack_kind(), Some(kind));
        }
        assert_eq!(AnimationState::WindUp.attack_kind(), None);
    }
}
