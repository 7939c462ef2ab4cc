//! Per-session round state.

use crate::core::{Cell, DifficultyProfile, Generation, Phase, Sequence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Everything the machine knows about the running session.
///
/// Only [`Game`](crate::game::Game) mutates it; the presentation layer gets
/// shared references or serialized snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub(crate) session: Uuid,
    pub(crate) phase: Phase,
    pub(crate) generation: Generation,
    pub(crate) sequence: Sequence,
    pub(crate) progress: Vec<Cell>,
    pub(crate) score: u32,
    pub(crate) difficulty: DifficultyProfile,
    pub(crate) lit: BTreeSet<Cell>,
}

impl RoundState {
    /// Fresh session state, before its first round is generated.
    pub(crate) fn new(difficulty: DifficultyProfile, generation: Generation) -> Self {
        Self {
            session: Uuid::new_v4(),
            phase: Phase::Idle,
            generation,
            sequence: Sequence::default(),
            progress: Vec::new(),
            score: 0,
            difficulty,
            lit: BTreeSet::new(),
        }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The sequence of the current round; empty before the first round.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Picks entered so far this round.
    pub fn progress(&self) -> &[Cell] {
        &self.progress
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Profile the session was started with.
    pub fn difficulty(&self) -> &DifficultyProfile {
        &self.difficulty
    }

    /// Cells currently highlighted.
    pub fn lit(&self) -> &BTreeSet<Cell> {
        &self.lit
    }

    /// Picks still needed to finish the round.
    pub fn remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.progress.len())
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(DifficultyProfile::default(), Generation::default())
    }
}
