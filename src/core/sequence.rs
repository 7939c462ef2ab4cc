//! Cells, sequences and the sources that generate them.

use super::difficulty::DifficultyProfile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use thiserror::Error;

/// Number of cells on the board (a 3×3 grid).
pub const CELL_COUNT: u8 = 9;

/// Raised when a raw index does not name a cell on the board.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Cell index {index} is out of range (0..{CELL_COUNT})")]
pub struct CellOutOfRange {
    pub index: u8,
}

/// Why a script of raw indices could not become a [`ScriptedCells`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Script has no cells")]
    Empty,
    #[error(transparent)]
    OutOfRange(#[from] CellOutOfRange),
}

/// One cell of the board. Always in `0..CELL_COUNT`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

impl Cell {
    /// Validate a raw index.
    ///
    /// ```rust
    /// use genius::core::Cell;
    ///
    /// assert_eq!(Cell::new(4).unwrap().index(), 4);
    /// assert!(Cell::new(9).is_err());
    /// ```
    pub fn new(index: u8) -> Result<Self, CellOutOfRange> {
        if index < CELL_COUNT {
            Ok(Self(index))
        } else {
            Err(CellOutOfRange { index })
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Every cell on the board, in index order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).map(Cell)
    }

    /// Row and column on the 3×3 grid.
    pub fn position(self) -> (u8, u8) {
        (self.0 / 3, self.0 % 3)
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellOutOfRange;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Cell::new(index)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cells a round asks the player to reproduce, in order.
///
/// Immutable once created.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Cell>);

impl Sequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Cell> {
        self.0.get(position).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }

    /// Whether `picks` is a prefix of this sequence.
    pub fn starts_with(&self, picks: &[Cell]) -> bool {
        self.0.starts_with(picks)
    }
}

impl From<Vec<Cell>> for Sequence {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

impl FromIterator<Cell> for Sequence {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for Sequence {
    type Output = Cell;

    fn index(&self, position: usize) -> &Cell {
        &self.0[position]
    }
}

impl TryFrom<&[u8]> for Sequence {
    type Error = CellOutOfRange;

    fn try_from(indices: &[u8]) -> Result<Self, Self::Error> {
        indices.iter().map(|&i| Cell::new(i)).collect()
    }
}

/// Produces the sequence for a round.
///
/// Implementations must return exactly `profile.sequence_length(score)`
/// cells. Debug builds of the game panic on any other length.
pub trait SequenceSource {
    fn generate(&mut self, profile: &DifficultyProfile, score: u32) -> Sequence;
}

/// Uniform, independent draws with replacement. Repeated neighbours are
/// allowed.
#[derive(Clone, Debug)]
pub struct RandomSequence<R: Rng = StdRng> {
    rng: R,
}

impl RandomSequence<StdRng> {
    /// Reproducible source: the same seed always yields the same sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSequence<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SequenceSource for RandomSequence<R> {
    fn generate(&mut self, profile: &DifficultyProfile, score: u32) -> Sequence {
        (0..profile.sequence_length(score))
            .map(|_| Cell(self.rng.gen_range(0..CELL_COUNT)))
            .collect()
    }
}

/// Deterministic source cycling through a fixed script of cells.
///
/// Every round replays the script from its start, so a longer round extends
/// the previous one, the way a classic Simon board does.
///
/// ```rust
/// use genius::core::{Difficulty, ScriptedCells, SequenceSource};
///
/// let mut source = ScriptedCells::from_indices(&[2, 5, 1, 7]).unwrap();
/// let easy = Difficulty::Easy.profile();
///
/// let first: Vec<u8> = source.generate(&easy, 0).iter().map(|c| c.index()).collect();
/// let second: Vec<u8> = source.generate(&easy, 2).iter().map(|c| c.index()).collect();
/// assert_eq!(first, vec![2, 5, 1]);
/// assert_eq!(second, vec![2, 5, 1, 7, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedCells {
    script: Vec<Cell>,
}

impl ScriptedCells {
    /// # Panics
    ///
    /// Panics if `script` is empty. Use [`ScriptedCells::from_indices`] for
    /// untrusted input.
    pub fn new(script: Vec<Cell>) -> Self {
        assert!(!script.is_empty(), "ScriptedCells needs at least one cell");
        Self { script }
    }

    pub fn from_indices(indices: &[u8]) -> Result<Self, ScriptError> {
        let script = indices
            .iter()
            .map(|&i| Cell::new(i))
            .collect::<Result<Vec<_>, _>>()?;
        if script.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self { script })
    }
}

impl SequenceSource for ScriptedCells {
    fn generate(&mut self, profile: &DifficultyProfile, score: u32) -> Sequence {
        self.script
            .iter()
            .copied()
            .cycle()
            .take(profile.sequence_length(score))
            .collect()
    }
}

impl<S: SequenceSource + ?Sized> SequenceSource for Box<S> {
    fn generate(&mut self, profile: &DifficultyProfile, score: u32) -> Sequence {
        (**self).generate(profile, score)
    }
}
