//! Build errors for the game builder.

use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building a game.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Invalid game settings: {}", describe(.0))]
    InvalidSettings(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
