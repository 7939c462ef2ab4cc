//! Core game types and logic.
//!
//! This module contains the pure pieces of the game:
//! - Round phases via the `State` trait
//! - Guard predicates for gating intents
//! - Phase transition history
//! - The difficulty profile table
//! - Cells, sequences and sequence sources
//!
//! Nothing here touches time or I/O.

mod difficulty;
mod generation;
mod guard;
mod history;
mod sequence;
mod state;

pub use difficulty::{Difficulty, DifficultyProfile, ParseDifficultyError};
pub use generation::Generation;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use sequence::{
    Cell, CellOutOfRange, RandomSequence, ScriptError, ScriptedCells, Sequence, SequenceSource,
    CELL_COUNT,
};
pub use state::{Phase, State};
