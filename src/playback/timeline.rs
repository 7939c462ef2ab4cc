//! Virtual-time timer queue.
//!
//! Timers are plain data ordered by deadline. Nothing fires by itself: the
//! owner pulls due timers with [`Timeline::pop_due`] whenever it advances
//! the clock, so callbacks never run concurrently.

use crate::core::Generation;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A timer pulled off the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    pub due_ms: u64,
    pub generation: Generation,
    pub payload: T,
}

#[derive(Debug)]
struct Timer<T> {
    due_ms: u64,
    // insertion order breaks ties between equal deadlines
    seq: u64,
    generation: Generation,
    payload: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Deadline-ordered timers over a millisecond clock.
///
/// ```rust
/// use genius::core::Generation;
/// use genius::playback::Timeline;
///
/// let g = Generation::default();
/// let mut timeline = Timeline::new();
/// timeline.schedule_in(500, g, "revert");
/// timeline.schedule_in(100, g, "blink");
///
/// assert_eq!(timeline.pop_due(1000).map(|t| t.payload), Some("blink"));
/// assert_eq!(timeline.now_ms(), 100);
/// assert_eq!(timeline.pop_due(1000).map(|t| t.payload), Some("revert"));
/// assert!(timeline.pop_due(1000).is_none());
/// ```
#[derive(Debug)]
pub struct Timeline<T> {
    now_ms: u64,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Timer<T>>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Current clock reading.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `payload` at absolute time `due_ms`.
    ///
    /// Deadlines in the past are clamped to now.
    pub fn schedule_at(&mut self, due_ms: u64, generation: Generation, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Timer {
            due_ms: due_ms.max(self.now_ms),
            seq,
            generation,
            payload,
        }));
    }

    /// Schedule `payload` `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, generation: Generation, payload: T) {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), generation, payload);
    }

    /// Deadline of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.peek().map(|Reverse(timer)| timer.due_ms)
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        if self.next_due_ms()? > until_ms {
            return None;
        }
        let Reverse(timer) = self.pending.pop()?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(Fired {
            due_ms: timer.due_ms,
            generation: timer.generation,
            payload: timer.payload,
        })
    }

    /// Move the clock forward to `until_ms` without firing anything.
    ///
    /// The clock never runs backwards.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Drop every timer scheduled under a generation older than `current`.
    ///
    /// Returns how many were dropped.
    pub fn cancel_before(&mut self, current: Generation) -> usize {
        let before = self.pending.len();
        self.pending
            .retain(|Reverse(timer)| timer.generation >= current);
        before - self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let g = Generation::default();
        let mut timeline = Timeline::new();
        timeline.schedule_at(300, g, 3);
        timeline.schedule_at(100, g, 1);
        timeline.schedule_at(200, g, 2);

        let fired: Vec<i32> = std::iter::from_fn(|| timeline.pop_due(u64::MAX))
            .map(|t| t.payload)
            .collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn equal_deadlines_fire_in_insertion_order() {
        let g = Generation::default();
        let mut timeline = Timeline::new();
        timeline.schedule_at(100, g, 'a');
        timeline.schedule_at(100, g, 'b');
        timeline.schedule_at(100, g, 'c');

        let fired: String = std::iter::from_fn(|| timeline.pop_due(100))
            .map(|t| t.payload)
            .collect();
        assert_eq!(fired, "abc");
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let g = Generation::default();
        let mut timeline = Timeline::new();
        timeline.schedule_at(500, g, ());

        assert!(timeline.pop_due(499).is_none());
        assert_eq!(timeline.now_ms(), 0);
        assert!(timeline.pop_due(500).is_some());
        assert_eq!(timeline.now_ms(), 500);
    }

    #[test]
    fn past_deadlines_are_clamped_to_now() {
        let g = Generation::default();
        let mut timeline = Timeline::new();
        timeline.settle(1000);
        timeline.schedule_at(10, g, ());

        assert_eq!(timeline.next_due_ms(), Some(1000));
    }

    #[test]
    fn schedule_in_is_relative_to_now() {
        let g = Generation::default();
        let mut timeline = Timeline::new();
        timeline.settle(250);
        timeline.schedule_in(500, g, ());
        assert_eq!(timeline.next_due_ms(), Some(750));
    }

    #[test]
    fn settle_never_rewinds() {
        let mut timeline: Timeline<()> = Timeline::new();
        timeline.settle(100);
        timeline.settle(50);
        assert_eq!(timeline.now_ms(), 100);
    }

    #[test]
    fn cancel_before_drops_older_generations() {
        let old = Generation::default();
        let current = old.next();
        let mut timeline = Timeline::new();
        timeline.schedule_at(100, old, "stale");
        timeline.schedule_at(200, current, "fresh");
        timeline.schedule_at(300, old, "stale");

        assert_eq!(timeline.cancel_before(current), 2);
        assert_eq!(timeline.len(), 1);
        let fired = timeline.pop_due(u64::MAX).unwrap();
        assert_eq!(fired.payload, "fresh");
        assert_eq!(fired.generation, current);
    }
}
