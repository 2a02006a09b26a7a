use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Ordinal complexity level of a piece of content.
///
/// Level 1 targets patients with no background; level 5 targets clinicians.
/// A `LevelNumber` can only be constructed for values in `1..=5`, so a map
/// keyed by it can never hold an out-of-range level.
///
/// Serializes as a bare integer (as a string when used as a JSON object key).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LevelNumber(u8);

impl LevelNumber {
    /// Lowest level.
    pub const MIN: LevelNumber = LevelNumber(1);
    /// Highest level.
    pub const MAX: LevelNumber = LevelNumber(5);

    /// Every level, in ascending order.
    pub const ALL: [LevelNumber; 5] = [
        LevelNumber(1),
        LevelNumber(2),
        LevelNumber(3),
        LevelNumber(4),
        LevelNumber(5),
    ];

    /// Create a level, rejecting values outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, TypeError> {
        if (Self::MIN.get()..=Self::MAX.get()).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeError::LevelOutOfRange(i64::from(value)))
        }
    }

    /// Parse a level from a wider integer (e.g. a JSON number).
    pub fn from_i64(value: i64) -> Result<Self, TypeError> {
        u8::try_from(value)
            .map_err(|_| TypeError::LevelOutOfRange(value))
            .and_then(Self::new)
    }

    /// The numeric value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LevelNumber {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LevelNumber> for u8 {
    fn from(level: LevelNumber) -> Self {
        level.0
    }
}

impl fmt::Debug for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
