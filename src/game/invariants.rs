//! Consistency checks over a round state.
//!
//! Uses Stillwater's `Validation` so a broken state reports every violated
//! rule at once rather than just the first.

use crate::core::Phase;
use crate::game::round::RoundState;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A rule a round state breaks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("Progress has {progress} picks but the sequence only {sequence} cells")]
    ProgressTooLong { progress: usize, sequence: usize },

    #[error("Progress diverges from the sequence while {phase}")]
    ProgressDiverged { phase: Phase },

    #[error("Round lost although every pick matched")]
    LostWithoutMismatch,

    #[error("Round won with {progress} of {sequence} picks")]
    WonIncomplete { progress: usize, sequence: usize },

    #[error("Sequence has {actual} cells, expected {expected} while {phase}")]
    WrongSequenceLength {
        phase: Phase,
        expected: usize,
        actual: usize,
    },

    #[error("Idle state still holds round data")]
    IdleNotEmpty,
}

fn rule(
    holds: bool,
    violation: impl FnOnce() -> InvariantViolation,
) -> Validation<(), NonEmptyVec<InvariantViolation>> {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Check every invariant, accumulating all violations.
pub fn check(state: &RoundState) -> Validation<(), NonEmptyVec<InvariantViolation>> {
    let progress = state.progress.len();
    let sequence = state.sequence.len();
    let is_prefix = state.sequence.starts_with(&state.progress);

    let mut checks = vec![rule(progress <= sequence, || {
        InvariantViolation::ProgressTooLong { progress, sequence }
    })];

    match state.phase {
        Phase::Idle => {
            checks.push(rule(sequence == 0 && progress == 0, || {
                InvariantViolation::IdleNotEmpty
            }));
        }
        Phase::PlayingBack | Phase::AwaitingInput => {
            let expected = state.difficulty.sequence_length(state.score);
            checks.push(rule(is_prefix, || InvariantViolation::ProgressDiverged {
                phase: state.phase,
            }));
            checks.push(rule(sequence == expected, || {
                InvariantViolation::WrongSequenceLength {
                    phase: state.phase,
                    expected,
                    actual: sequence,
                }
            }));
            if state.phase == Phase::PlayingBack {
                checks.push(rule(progress == 0, || InvariantViolation::ProgressTooLong {
                    progress,
                    sequence: 0,
                }));
            }
        }
        Phase::RoundWon => {
            // the score already counts the round just won
            let expected = state
                .difficulty
                .sequence_length(state.score.saturating_sub(1));
            checks.push(rule(is_prefix, || InvariantViolation::ProgressDiverged {
                phase: state.phase,
            }));
            checks.push(rule(progress == sequence, || {
                InvariantViolation::WonIncomplete { progress, sequence }
            }));
            checks.push(rule(state.score > 0 && sequence == expected, || {
                InvariantViolation::WrongSequenceLength {
                    phase: state.phase,
                    expected,
                    actual: sequence,
                }
            }));
        }
        Phase::RoundLost => {
            checks.push(rule(!is_prefix, || InvariantViolation::LostWithoutMismatch));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Human-readable list of violations, empty when the state is consistent.
pub fn describe(state: &RoundState) -> Vec<String> {
    match check(state) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().map(|e| e.to_string()).collect(),
    }
}
