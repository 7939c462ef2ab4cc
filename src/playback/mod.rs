//! Timed playback of sequences.
//!
//! - **Schedule**: pure computation of when each blink starts, how long it
//!   lasts and when playback is over
//! - **Timeline**: deadline-ordered, generation-tagged timers over a
//!   virtual millisecond clock
//!
//! The game turns a plan into timers and pumps the timeline as time passes;
//! timers from a superseded round are dropped rather than fired.

mod schedule;
mod timeline;

pub use schedule::{schedule, step_offset_ms, BlinkKind, HighlightEvent, PlaybackPlan};
pub use timeline::{Fired, Timeline};
