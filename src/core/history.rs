//! Phase transition history.
//!
//! Records every move the machine makes, stamped with the game clock, the
//! round generation and the wall-clock time it happened at.

use super::generation::Generation;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use genius::core::{Generation, Phase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Idle,
///     to: Phase::PlayingBack,
///     at_ms: 0,
///     generation: Generation::default().next(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.generation.value(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Game clock reading when the transition happened
    pub at_ms: u64,
    /// Round generation the transition belongs to
    pub generation: Generation,
    /// Wall-clock time of the transition
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use genius::core::{Generation, Phase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// let generation = Generation::default().next();
///
/// history.record(StateTransition {
///     from: Phase::Idle,
///     to: Phase::PlayingBack,
///     at_ms: 0,
///     generation,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Phase::PlayingBack,
///     to: Phase::AwaitingInput,
///     at_ms: 4000,
///     generation,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::Idle, &Phase::PlayingBack, &Phase::AwaitingInput]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Drop every recorded transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state followed by the `to` state of each
    /// transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Game-clock time between the first and last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => Some(Duration::from_millis(
                last.at_ms.saturating_sub(first.at_ms),
            )),
            _ => None,
        }
    }

    /// Transitions recorded under a particular round generation.
    pub fn for_generation(
        &self,
        generation: Generation,
    ) -> impl Iterator<Item = &StateTransition<S>> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.generation == generation)
    }

    /// Get all transitions, in order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
