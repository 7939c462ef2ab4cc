//! Guard predicates for gating what a phase allows.
//!
//! Guards are pure boolean functions over a state. The game uses them to
//! decide whether an inbound intent is acted on or silently dropped.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate over a state.
///
/// # Example
///
/// ```rust
/// use genius::core::{Guard, Phase};
///
/// let accepts_picks = Guard::new(|phase: &Phase| phase.accepts_input());
///
/// assert!(accepts_picks.check(&Phase::AwaitingInput));
/// assert!(!accepts_picks.check(&Phase::PlayingBack));
/// ```
pub struct Guard<S: State> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard lets `state` through.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::new(|p: &Phase| matches!(p, Phase::Idle));

        assert!(guard.check(&Phase::Idle));
        assert!(!guard.check(&Phase::PlayingBack));
    }

    #[test]
    fn guard_checks_non_final_states() {
        let guard = Guard::new(|p: &Phase| !p.is_final());

        assert!(guard.check(&Phase::AwaitingInput));
        assert!(guard.check(&Phase::RoundWon));
        assert!(!guard.check(&Phase::RoundLost));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(Phase::accepts_input);

        let result1 = guard.check(&Phase::AwaitingInput);
        let result2 = guard.check(&Phase::AwaitingInput);

        assert_eq!(result1, result2);
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|p: &Phase| matches!(p, Phase::RoundWon | Phase::RoundLost));
        let cloned = guard.clone();

        assert!(cloned.check(&Phase::RoundWon));
        assert!(cloned.check(&Phase::RoundLost));
        assert!(!cloned.check(&Phase::Idle));
    }
}
