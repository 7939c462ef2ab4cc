//! Turning a sequence into timed highlight events.

use crate::core::{Cell, Generation, Sequence};
use serde::{Deserialize, Serialize};

/// Why a cell is blinking.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BlinkKind {
    /// Step `step` of the machine's playback.
    Playback { step: usize },
    /// Echo of a player pick.
    Feedback,
}

/// One blink to render: light `cell` for `duration_ms`.
///
/// `start_offset_ms` is relative to the start of the playback it belongs
/// to; feedback blinks start immediately and carry an offset of zero.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HighlightEvent {
    pub generation: Generation,
    pub cell: Cell,
    pub start_offset_ms: u64,
    pub duration_ms: u64,
    pub kind: BlinkKind,
}

/// Timed blinks for one round plus the moment playback counts as finished.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PlaybackPlan {
    pub generation: Generation,
    pub step_duration_ms: u64,
    pub events: Vec<HighlightEvent>,
    /// Offset at which input opens.
    pub complete_at_ms: u64,
}

/// Offset of playback step `step`.
///
/// Steps are spaced one and a half step durations apart so every blink is
/// followed by a dark gap.
pub fn step_offset_ms(step: usize, step_duration_ms: u64) -> u64 {
    step as u64 * step_duration_ms * 3 / 2
}

/// Plan the playback of `sequence`.
///
/// Blink `i` starts at `i * step * 1.5` and lasts `step / 2`. Playback
/// completes one full step after the last blink starts, once that blink has
/// gone dark. An empty sequence completes immediately.
///
/// ```rust
/// use genius::core::{Generation, Sequence};
/// use genius::playback::schedule;
///
/// let seq = Sequence::try_from(&[2u8, 5, 1][..]).unwrap();
/// let plan = schedule(&seq, 1000, Generation::default().next());
///
/// let offsets: Vec<u64> = plan.events.iter().map(|e| e.start_offset_ms).collect();
/// assert_eq!(offsets, vec![0, 1500, 3000]);
/// assert!(plan.events.iter().all(|e| e.duration_ms == 500));
/// assert_eq!(plan.complete_at_ms, 4000);
/// ```
pub fn schedule(sequence: &Sequence, step_duration_ms: u64, generation: Generation) -> PlaybackPlan {
    let events: Vec<HighlightEvent> = sequence
        .iter()
        .enumerate()
        .map(|(step, cell)| HighlightEvent {
            generation,
            cell,
            start_offset_ms: step_offset_ms(step, step_duration_ms),
            duration_ms: step_duration_ms / 2,
            kind: BlinkKind::Playback { step },
        })
        .collect();

    let complete_at_ms = events
        .last()
        .map_or(0, |last| last.start_offset_ms + step_duration_ms);

    PlaybackPlan {
        generation,
        step_duration_ms,
        events,
        complete_at_ms,
    }
}

impl PlaybackPlan {
    /// Number of blinks in the plan.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
