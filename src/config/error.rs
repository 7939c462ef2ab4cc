//! Configuration error types.

use thiserror::Error;

/// A rule a config breaks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Next-round delay {delay_ms}ms is shorter than a blink ({blink_ms}ms)")]
    DelayShorterThanBlink { delay_ms: u64, blink_ms: u64 },

    #[error("Next-round delay {delay_ms}ms exceeds the maximum of {max_ms}ms")]
    DelayTooLong { delay_ms: u64, max_ms: u64 },
}

/// Errors that can occur while loading a config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for a `GameConfig`
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but breaks one or more rules
    #[error("Invalid config: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
