//! Outbound notifications for the presentation layer.

use crate::core::{Cell, Difficulty, Generation, Phase};
use crate::playback::HighlightEvent;
use serde::{Deserialize, Serialize};

pub const ROUND_WON_MESSAGE: &str = "Congratulations! You got the sequence right!";
pub const ROUND_LOST_MESSAGE: &str = "Oops! You got the sequence wrong. Try again.";

/// Something the presenter should render or announce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Light a cell.
    Highlight(HighlightEvent),
    /// Turn a lit cell back off.
    Revert { cell: Cell, generation: Generation },
    PhaseChanged { from: Phase, to: Phase },
    ScoreChanged { score: u32 },
    /// The selection that the next session will use.
    DifficultySelected { difficulty: Difficulty },
    RoundWon { message: String, score: u32 },
    RoundLost { message: String, score: u32 },
}

impl GameEvent {
    pub(crate) fn round_won(score: u32) -> Self {
        Self::RoundWon {
            message: ROUND_WON_MESSAGE.to_string(),
            score,
        }
    }

    pub(crate) fn round_lost(score: u32) -> Self {
        Self::RoundLost {
            message: ROUND_LOST_MESSAGE.to_string(),
            score,
        }
    }

    /// Generation the event is tied to, for events that belong to a round.
    pub fn generation(&self) -> Option<Generation> {
        match self {
            Self::Highlight(event) => Some(event.generation),
            Self::Revert { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}

/// What a pick did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// Not accepting input right now; nothing changed.
    Ignored,
    /// Correct, more picks needed.
    Accepted,
    /// Correct and the sequence is complete.
    Completed,
    /// Wrong cell at `position`.
    Mismatch { position: usize, expected: Cell },
}
