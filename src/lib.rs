//! Genius: the core of a memory-sequence game.
//!
//! The machine blinks a growing sequence of cells on a 3×3 board, the
//! player repeats it, and every success makes the next sequence one cell
//! longer. A single wrong pick ends the session.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - [`core`]: phases, guards, history, the difficulty table and sequence
//!   generation; no time, no I/O
//! - [`playback`]: pure playback planning and a virtual-time timer queue
//! - [`game`]: the state machine that ties them together
//! - [`config`] and [`builder`]: validated construction
//! - `runtime` (feature `runtime`): a tokio driver mapping wall-clock time
//!   onto the game clock
//!
//! Rendering is left to the caller: feed intents in, drain events out.
//!
//! # Example
//!
//! ```rust
//! use genius::core::{Cell, Difficulty, Phase, ScriptedCells};
//! use genius::game::{Game, GameEvent, Settings};
//!
//! let source = ScriptedCells::from_indices(&[2, 5, 1]).unwrap();
//! let mut game = Game::with_source(source, Difficulty::Easy, Settings::default());
//!
//! game.start_game();
//! game.advance_by(4000);
//! assert_eq!(game.phase(), Phase::AwaitingInput);
//!
//! game.on_player_pick(Cell::new(2).unwrap());
//! game.on_player_pick(Cell::new(5).unwrap());
//! game.on_player_pick(Cell::new(0).unwrap());
//! assert_eq!(game.phase(), Phase::RoundLost);
//!
//! let lost = game
//!     .drain_events()
//!     .into_iter()
//!     .any(|e| matches!(e, GameEvent::RoundLost { score: 0, .. }));
//! assert!(lost);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod game;
pub mod playback;
#[cfg(feature = "runtime")]
pub mod runtime;

// Re-export commonly used types
pub use builder::GameBuilder;
pub use crate::core::{Cell, Difficulty, Phase, Sequence};
pub use game::{Game, GameEvent, Intent};
