//! Difficulty profile table.
//!
//! Each difficulty fixes how long a playback step lasts and how long the
//! first sequence of a session is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Difficulty levels a session can be played at.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Timing and length parameters for one difficulty.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Length of one playback step; blinks last half of it.
    pub step_duration_ms: u64,
    /// Sequence length at score zero.
    pub base_length: usize,
}

const PROFILES: [DifficultyProfile; 3] = [
    DifficultyProfile {
        difficulty: Difficulty::Easy,
        step_duration_ms: 1000,
        base_length: 3,
    },
    DifficultyProfile {
        difficulty: Difficulty::Medium,
        step_duration_ms: 700,
        base_length: 5,
    },
    DifficultyProfile {
        difficulty: Difficulty::Hard,
        step_duration_ms: 400,
        base_length: 7,
    },
];

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Look up the fixed profile for this difficulty.
    ///
    /// ```rust
    /// use genius::core::Difficulty;
    ///
    /// let hard = Difficulty::Hard.profile();
    /// assert_eq!(hard.step_duration_ms, 400);
    /// assert_eq!(hard.base_length, 7);
    /// ```
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => PROFILES[0],
            Self::Medium => PROFILES[1],
            Self::Hard => PROFILES[2],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl DifficultyProfile {
    /// How long each blink stays lit.
    pub fn blink_ms(&self) -> u64 {
        self.step_duration_ms / 2
    }

    /// Sequence length for a round played at `score`.
    pub fn sequence_length(&self, score: u32) -> usize {
        self.base_length + score as usize
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a difficulty name is not one of `easy`, `medium`, `hard`.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown difficulty '{0}', expected one of: easy, medium, hard")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Self::Easy),
            "medium" | "m" => Ok(Self::Medium),
            "hard" | "h" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
