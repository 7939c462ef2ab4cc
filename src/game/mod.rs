//! The input-validating game state machine.
//!
//! [`Game`] owns the round state, the sequence source and the timer queue.
//! The presentation layer talks to it through a narrow surface:
//!
//! - **Inbound**: `start_game`, `on_player_pick`, `set_difficulty` (or the
//!   equivalent [`Intent`]s) plus the clock pump `advance_to`
//! - **Outbound**: [`GameEvent`]s collected with `drain_events`, and
//!   read-only access to [`RoundState`]

mod events;
mod intent;
pub mod invariants;
mod machine;
mod round;

pub use events::{GameEvent, PickOutcome, ROUND_LOST_MESSAGE, ROUND_WON_MESSAGE};
pub use intent::Intent;
pub use invariants::InvariantViolation;
pub use machine::{Game, Settings, DEFAULT_NEXT_ROUND_DELAY_MS};
pub use round::RoundState;
