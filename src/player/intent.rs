//! Per-tick input intents
//!
//! The simulation never sees key codes. Whatever polls the device builds an
//! `IntentSet` once per tick and hands it to the director.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// One abstract player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Jab,
    Straight,
    Dodge,
    Special,
}

impl Intent {
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Immutable snapshot of the intents asserted this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSet {
    bits: u8,
}

impl IntentSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, intent: Intent) -> Self {
        self.insert(intent);
        self
    }

    pub fn insert(&mut self, intent: Intent) {
        self.bits |= intent.bit();
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.bits & intent.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Unit-length movement direction (zero when no or cancelling input)
    ///
    /// Screen space: +y is down.
    pub fn movement_vector(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.contains(Intent::MoveLeft) {
            dir.x -= 1.0;
        }
        if self.contains(Intent::MoveRight) {
            dir.x += 1.0;
        }
        if self.contains(Intent::MoveUp) {
            dir.y -= 1.0;
        }
        if self.contains(Intent::MoveDown) {
            dir.y += 1.0;
        }
        dir.normalize()
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
        let mut set = IntentSet::empty();
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}
