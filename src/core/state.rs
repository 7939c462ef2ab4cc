//! Core State trait and the game's round phases.
//!
//! The round moves through a small, fixed set of phases. The `State` trait
//! gives a pure way of inspecting them for history, logging and display.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are immutable values
/// describing where a round currently is.
///
/// # Example
///
/// ```rust
/// use genius::core::{Phase, State};
///
/// assert_eq!(Phase::AwaitingInput.name(), "AwaitingInput");
/// assert!(Phase::RoundLost.is_final());
/// assert!(!Phase::RoundWon.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Where the current round is.
///
/// ```text
/// Idle -> PlayingBack -> AwaitingInput -> RoundWon -> PlayingBack ...
///                                      \-> RoundLost -> Idle
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session running.
    #[default]
    Idle,
    /// The machine is blinking the sequence.
    PlayingBack,
    /// The player is reproducing the sequence.
    AwaitingInput,
    /// The whole sequence was reproduced; the next round is pending.
    RoundWon,
    /// A pick diverged from the sequence; the session is over.
    RoundLost,
}

impl Phase {
    /// Whether player picks are accepted in this phase.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::AwaitingInput)
    }

    /// Whether the machine may move from `self` to `next`.
    ///
    /// Any phase may drop back to `Idle`, which is how a running session is
    /// abandoned on restart.
    pub fn can_transition_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (_, Self::Idle)
                | (Self::Idle, Self::PlayingBack)
                | (Self::PlayingBack, Self::AwaitingInput)
                | (Self::AwaitingInput, Self::RoundWon)
                | (Self::AwaitingInput, Self::RoundLost)
                | (Self::RoundWon, Self::PlayingBack)
        )
    }

    /// Prompt shown to the player while in this phase, if any.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::PlayingBack => Some("Observe the sequence..."),
            Self::AwaitingInput => Some("Your turn! Repeat the sequence."),
            _ => None,
        }
    }
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::PlayingBack => "PlayingBack",
            Self::AwaitingInput => "AwaitingInput",
            Self::RoundWon => "RoundWon",
            Self::RoundLost => "RoundLost",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::RoundLost)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::RoundLost)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Phase; 5] = [
        Phase::Idle,
        Phase::PlayingBack,
        Phase::AwaitingInput,
        Phase::RoundWon,
        Phase::RoundLost,
    ];

    #[test]
    fn phase_names_are_stable() {
        assert_eq!(Phase::Idle.name(), "Idle");
        assert_eq!(Phase::PlayingBack.name(), "PlayingBack");
        assert_eq!(Phase::AwaitingInput.name(), "AwaitingInput");
        assert_eq!(Phase::RoundWon.name(), "RoundWon");
        assert_eq!(Phase::RoundLost.name(), "RoundLost");
    }

    #[test]
    fn only_awaiting_input_accepts_picks() {
        for phase in ALL {
            assert_eq!(phase.accepts_input(), phase == Phase::AwaitingInput);
        }
    }

    #[test]
    fn round_lost_is_the_only_terminal_phase() {
        for phase in ALL {
            assert_eq!(phase.is_final(), phase == Phase::RoundLost);
            assert_eq!(phase.is_error(), phase == Phase::RoundLost);
        }
    }

    #[test]
    fn forward_transitions_follow_the_round_cycle() {
        assert!(Phase::Idle.can_transition_to(Phase::PlayingBack));
        assert!(Phase::PlayingBack.can_transition_to(Phase::AwaitingInput));
        assert!(Phase::AwaitingInput.can_transition_to(Phase::RoundWon));
        assert!(Phase::AwaitingInput.can_transition_to(Phase::RoundLost));
        assert!(Phase::RoundWon.can_transition_to(Phase::PlayingBack));
    }

    #[test]
    fn shortcuts_are_rejected() {
        assert!(!Phase::Idle.can_transition_to(Phase::AwaitingInput));
        assert!(!Phase::PlayingBack.can_transition_to(Phase::RoundWon));
        assert!(!Phase::RoundLost.can_transition_to(Phase::PlayingBack));
        assert!(!Phase::RoundWon.can_transition_to(Phase::AwaitingInput));
    }

    #[test]
    fn every_phase_can_reset_to_idle() {
        for phase in ALL {
            assert!(phase.can_transition_to(Phase::Idle));
        }
    }

    #[test]
    fn prompts_only_during_play() {
        assert_eq!(Phase::PlayingBack.prompt(), Some("Observe the sequence..."));
        assert_eq!(
            Phase::AwaitingInput.prompt(),
            Some("Your turn! Repeat the sequence.")
        );
        assert!(Phase::Idle.prompt().is_none());
        assert!(Phase::RoundLost.prompt().is_none());
    }

    #[test]
    fn phase_serializes_as_snake_case() {
        let json = serde_json::to_string(&Phase::AwaitingInput).unwrap();
        assert_eq!(json, "\"awaiting_input\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::AwaitingInput);
    }
}
