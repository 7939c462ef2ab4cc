//! Inbound intents from the presentation layer.

use crate::core::{Cell, Difficulty};
use serde::{Deserialize, Serialize};

/// A request from the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    StartGame,
    Pick { cell: Cell },
    SetDifficulty { difficulty: Difficulty },
    Quit,
}

impl Intent {
    pub fn pick(cell: Cell) -> Self {
        Self::Pick { cell }
    }

    pub fn set_difficulty(difficulty: Difficulty) -> Self {
        Self::SetDifficulty { difficulty }
    }
}
