//! Game configuration.
//!
//! A [`GameConfig`] is plain serde data, usually read from a JSON file.
//! Checks use Stillwater's `Validation` so every problem with a config is
//! reported in one pass.
//!
//! # Example
//!
//! ```rust
//! use genius::config::GameConfig;
//! use genius::core::Difficulty;
//!
//! let config = GameConfig::from_json(r#"{ "difficulty": "medium", "seed": 7 }"#).unwrap();
//! assert_eq!(config.difficulty, Difficulty::Medium);
//! assert_eq!(config.next_round_delay_ms, 1000);
//! assert_eq!(config.seed, Some(7));
//! ```

pub mod error;

pub use error::{ConfigError, ConfigViolation};

use crate::core::Difficulty;
use crate::game::{Settings, DEFAULT_NEXT_ROUND_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Longest pause allowed between a won round and the next playback.
pub const MAX_NEXT_ROUND_DELAY_MS: u64 = 60_000;

/// Everything a session can be configured with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub next_round_delay_ms: u64,
    pub pick_feedback: bool,
    /// Fixed generator seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            next_round_delay_ms: DEFAULT_NEXT_ROUND_DELAY_MS,
            pick_feedback: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the config, accumulating all violations.
    ///
    /// The delay is checked against the longest blink of any difficulty, since
    /// the difficulty can change between sessions without a new config.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let blink_ms = longest_blink_ms();
        let delay_ms = self.next_round_delay_ms;

        let checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = vec![
            // the last pick's blink must go dark before the next playback
            if delay_ms >= blink_ms {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::DelayShorterThanBlink { delay_ms, blink_ms })
            },
            if delay_ms <= MAX_NEXT_ROUND_DELAY_MS {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::DelayTooLong {
                    delay_ms,
                    max_ms: MAX_NEXT_ROUND_DELAY_MS,
                })
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// `self` if valid, otherwise every violation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// The non-difficulty tunables.
    pub fn settings(&self) -> Settings {
        Settings {
            next_round_delay_ms: self.next_round_delay_ms,
            pick_feedback: self.pick_feedback,
        }
    }
}

fn longest_blink_ms() -> u64 {
    Difficulty::ALL
        .iter()
        .map(|d| d.profile().blink_ms())
        .max()
        .unwrap_or_default()
}
