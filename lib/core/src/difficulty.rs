//! Difficulty level shared by every outgoing request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when a difficulty value is outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyError {
    /// The rejected value.
    pub value: i64,
}

impl fmt::Display for DifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "difficulty {} is out of range ({}..={})",
            self.value,
            Difficulty::MIN,
            Difficulty::MAX
        )
    }
}

impl std::error::Error for DifficultyError {}

/// Explanation level from 1 (beginner) to 5 (expert).
///
/// Serialized as a bare integer. Deserializing a value outside the range
/// fails, so request bodies carrying a bad level never reach the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    /// Lowest level.
    pub const MIN: u8 = 1;
    /// Highest level.
    pub const MAX: u8 = 5;

    /// Creates a difficulty, returning `None` when out of range.
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Creates a difficulty, clamping into range.
    #[must_use]
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Human-readable band shown next to the slider.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            Self::MIN => "Beginner",
            Self::MAX => "Expert",
            _ => "Intermediate",
        }
    }

    /// All levels in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = DifficultyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(DifficultyError { value })
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}
