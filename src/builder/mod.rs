//! Fluent construction of games.
//!
//! ```rust
//! use genius::builder::GameBuilder;
//! use genius::core::{Difficulty, Phase};
//!
//! let mut game = GameBuilder::new()
//!     .difficulty(Difficulty::Medium)
//!     .seed(42)
//!     .next_round_delay_ms(1500)
//!     .build()
//!     .unwrap();
//!
//! game.start_game();
//! assert_eq!(game.phase(), Phase::PlayingBack);
//! assert_eq!(game.sequence().len(), 5);
//! ```

pub mod error;

pub use error::BuildError;

use crate::config::GameConfig;
use crate::core::{Difficulty, RandomSequence, SequenceSource};
use crate::game::{Game, Settings};
use stillwater::validation::Validation;

/// Builder for [`Game`]s.
pub struct GameBuilder<G = RandomSequence> {
    difficulty: Difficulty,
    settings: Settings,
    source: G,
}

impl GameBuilder<RandomSequence> {
    /// Builder for an easy game with an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::default(),
            settings: Settings::default(),
            source: RandomSequence::from_entropy(),
        }
    }

    /// Builder seeded from a config, including its generator seed.
    pub fn from_config(config: &GameConfig) -> Self {
        let builder = Self::new().config(config);
        match config.seed {
            Some(seed) => builder.seed(seed),
            None => builder,
        }
    }

    /// Use a reproducible generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.source = RandomSequence::seeded(seed);
        self
    }
}

impl Default for GameBuilder<RandomSequence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SequenceSource> GameBuilder<G> {
    /// Difficulty of the first session.
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn next_round_delay_ms(mut self, delay_ms: u64) -> Self {
        self.settings.next_round_delay_ms = delay_ms;
        self
    }

    pub fn pick_feedback(mut self, enabled: bool) -> Self {
        self.settings.pick_feedback = enabled;
        self
    }

    /// Take difficulty and settings from a config. The seed is not applied
    /// here; see [`GameBuilder::from_config`].
    pub fn config(self, config: &GameConfig) -> Self {
        self.difficulty(config.difficulty)
            .next_round_delay_ms(config.next_round_delay_ms)
            .pick_feedback(config.pick_feedback)
    }

    /// Replace the sequence source.
    pub fn source<H: SequenceSource>(self, source: H) -> GameBuilder<H> {
        GameBuilder {
            difficulty: self.difficulty,
            settings: self.settings,
            source,
        }
    }

    /// Build the game.
    /// Returns an error if the settings break a config rule.
    pub fn build(self) -> Result<Game<G>, BuildError> {
        let config = GameConfig {
            difficulty: self.difficulty,
            next_round_delay_ms: self.settings.next_round_delay_ms,
            pick_feedback: self.settings.pick_feedback,
            seed: None,
        };
        if let Validation::Failure(errors) = config.validate() {
            return Err(BuildError::InvalidSettings(
                errors.iter().cloned().collect(),
            ));
        }
        Ok(Game::with_source(
            self.source,
            self.difficulty,
            self.settings,
        ))
    }
}
