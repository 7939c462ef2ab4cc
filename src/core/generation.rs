//! Round generation identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic counter distinguishing rounds.
///
/// Every timer captures the generation current when it was scheduled; once
/// the game moves to a newer generation those timers are stale and are
/// dropped instead of fired.
///
/// ```rust
/// use genius::core::Generation;
///
/// let first = Generation::default().next();
/// let second = first.next();
/// assert!(second > first);
/// assert_eq!(second.value(), 2);
/// ```
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// The generation after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}
