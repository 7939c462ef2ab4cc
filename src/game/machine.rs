//! The game state machine.

use crate::core::{
    Cell, Difficulty, DifficultyProfile, Generation, Guard, Phase, RandomSequence, Sequence,
    SequenceSource, State, StateHistory, StateTransition,
};
use crate::game::events::{GameEvent, PickOutcome};
use crate::game::intent::Intent;
use crate::game::invariants;
use crate::game::round::RoundState;
use crate::playback::{schedule, BlinkKind, HighlightEvent, PlaybackPlan, Timeline};
use chrono::Utc;
use std::collections::BTreeMap;

/// Pause between a won round and the playback of the next one.
pub const DEFAULT_NEXT_ROUND_DELAY_MS: u64 = 1000;

/// Tunables that are not part of the difficulty table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub next_round_delay_ms: u64,
    /// Blink the picked cell on every accepted pick.
    pub pick_feedback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            next_round_delay_ms: DEFAULT_NEXT_ROUND_DELAY_MS,
            pick_feedback: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Timer {
    Blink(HighlightEvent),
    /// Darken `cell` if its latest blink ends at `until_ms`.
    Revert { cell: Cell, until_ms: u64 },
    PlaybackComplete,
    NextRound,
}

/// A game session driven by intents and a virtual clock.
///
/// All mutation goes through `&mut self`; timers live in an internal
/// [`Timeline`] and only fire from [`Game::advance_to`].
///
/// ```rust
/// use genius::core::{Cell, Difficulty, Phase, ScriptedCells};
/// use genius::game::{Game, Settings};
///
/// let source = ScriptedCells::from_indices(&[2, 5, 1]).unwrap();
/// let mut game = Game::with_source(source, Difficulty::Easy, Settings::default());
///
/// game.start_game();
/// assert_eq!(game.phase(), Phase::PlayingBack);
///
/// game.advance_by(4000);
/// assert_eq!(game.phase(), Phase::AwaitingInput);
///
/// for index in [2, 5, 1] {
///     game.on_player_pick(Cell::new(index).unwrap());
/// }
/// assert_eq!(game.phase(), Phase::RoundWon);
/// assert_eq!(game.score(), 1);
/// ```
pub struct Game<G = RandomSequence> {
    state: RoundState,
    selected: Difficulty,
    settings: Settings,
    source: G,
    timeline: Timeline<Timer>,
    plan: Option<PlaybackPlan>,
    history: StateHistory<Phase>,
    input_gate: Guard<Phase>,
    outbox: Vec<GameEvent>,
    /// When each lit cell's most recent blink ends.
    lit_until: BTreeMap<Cell, u64>,
}

impl Game<RandomSequence> {
    /// Easy game with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_source(
            RandomSequence::from_entropy(),
            Difficulty::default(),
            Settings::default(),
        )
    }

    /// Reproducible game: the same seed yields the same sequences.
    pub fn seeded(seed: u64, difficulty: Difficulty) -> Self {
        Self::with_source(RandomSequence::seeded(seed), difficulty, Settings::default())
    }
}

impl Default for Game<RandomSequence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SequenceSource> Game<G> {
    pub fn with_source(source: G, difficulty: Difficulty, settings: Settings) -> Self {
        Self {
            state: RoundState::new(difficulty.profile(), Generation::default()),
            selected: difficulty,
            settings,
            source,
            timeline: Timeline::new(),
            plan: None,
            history: StateHistory::new(),
            input_gate: Guard::new(Phase::accepts_input),
            outbox: Vec::new(),
            lit_until: BTreeMap::new(),
        }
    }

    // --- queries ---

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Owned copy of the round state for rendering or serialization.
    pub fn snapshot(&self) -> RoundState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn generation(&self) -> Generation {
        self.state.generation
    }

    pub fn sequence(&self) -> &Sequence {
        &self.state.sequence
    }

    pub fn progress(&self) -> &[Cell] {
        &self.state.progress
    }

    /// Difficulty the next `start_game` will use.
    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    /// Profile of the running session.
    pub fn active_profile(&self) -> &DifficultyProfile {
        &self.state.difficulty
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Plan of the most recent playback.
    pub fn playback_plan(&self) -> Option<&PlaybackPlan> {
        self.plan.as_ref()
    }

    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }

    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    /// When the next timer is due, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timeline.next_due_ms()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    // --- intents ---

    /// Apply an intent. Returns `false` for [`Intent::Quit`].
    pub fn handle(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::StartGame => self.start_game(),
            Intent::Pick { cell } => {
                self.on_player_pick(cell);
            }
            Intent::SetDifficulty { difficulty } => self.set_difficulty(difficulty),
            Intent::Quit => return false,
        }
        true
    }

    /// Select the difficulty for the next session.
    ///
    /// A running session keeps the profile it was started with.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.selected == difficulty {
            return;
        }
        log::debug!("difficulty {} -> {}", self.selected, difficulty);
        self.selected = difficulty;
        self.outbox
            .push(GameEvent::DifficultySelected { difficulty });
    }

    /// Start a new session, abandoning any running one.
    pub fn start_game(&mut self) {
        if self.state.phase != Phase::Idle {
            log::info!(
                "abandoning session {} at score {}",
                self.state.session,
                self.state.score
            );
            self.transition(Phase::Idle);
        }
        self.darken_all();

        let generation = self.state.generation;
        self.state = RoundState::new(self.selected.profile(), generation);
        self.history.clear();
        log::info!(
            "session {} started on {}",
            self.state.session,
            self.selected
        );
        self.outbox.push(GameEvent::ScoreChanged { score: 0 });

        self.begin_round();
    }

    /// Open input once playback has finished.
    ///
    /// Normally fired by the playback completion timer; outside of
    /// `PlayingBack` it does nothing.
    pub fn on_playback_complete(&mut self) {
        if self.state.phase != Phase::PlayingBack {
            log::trace!("playback completion ignored while {}", self.state.phase);
            return;
        }
        self.transition(Phase::AwaitingInput);
        self.check_invariants();
    }

    /// Feed one player pick to the round.
    pub fn on_player_pick(&mut self, cell: Cell) -> PickOutcome {
        if !self.input_gate.check(&self.state.phase) {
            log::trace!("pick {} ignored while {}", cell, self.state.phase);
            return PickOutcome::Ignored;
        }

        if self.settings.pick_feedback {
            self.feedback_blink(cell);
        }

        self.state.progress.push(cell);
        let position = self.state.progress.len() - 1;
        let expected = self.state.sequence[position];

        let outcome = if cell != expected {
            log::info!(
                "session {} lost at pick {} (expected {}, got {}), score {}",
                self.state.session,
                position,
                expected,
                cell,
                self.state.score
            );
            self.transition(Phase::RoundLost);
            self.outbox.push(GameEvent::round_lost(self.state.score));
            PickOutcome::Mismatch { position, expected }
        } else if self.state.progress.len() == self.state.sequence.len() {
            self.state.score += 1;
            log::info!(
                "session {} won round of {}, score {}",
                self.state.session,
                self.state.sequence.len(),
                self.state.score
            );
            self.outbox.push(GameEvent::ScoreChanged {
                score: self.state.score,
            });
            self.transition(Phase::RoundWon);
            self.outbox.push(GameEvent::round_won(self.state.score));
            self.timeline.schedule_in(
                self.settings.next_round_delay_ms,
                self.state.generation,
                Timer::NextRound,
            );
            PickOutcome::Completed
        } else {
            PickOutcome::Accepted
        };

        self.check_invariants();
        outcome
    }

    // --- time ---

    /// Run the clock forward to `now_ms`, firing every timer due on the way.
    ///
    /// Timers fire in deadline order with the clock set to their deadline,
    /// so anything they schedule is timed from when they fired.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.timeline.pop_due(now_ms) {
            if fired.generation != self.state.generation {
                log::trace!(
                    "dropping stale {:?} from {} (current {})",
                    fired.payload,
                    fired.generation,
                    self.state.generation
                );
                continue;
            }
            self.fire(fired.payload);
        }
        self.timeline.settle(now_ms);
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        self.advance_to(self.timeline.now_ms().saturating_add(delta_ms));
    }

    // --- internals ---

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::Blink(event) => {
                let until_ms = self.timeline.now_ms() + event.duration_ms;
                self.light(event.cell, until_ms);
                self.outbox.push(GameEvent::Highlight(event));
            }
            Timer::Revert { cell, until_ms } => self.revert(cell, until_ms),
            Timer::PlaybackComplete => self.on_playback_complete(),
            Timer::NextRound => {
                if self.state.phase == Phase::RoundWon {
                    self.begin_round();
                }
            }
        }
    }

    /// Generate and schedule the next round under a fresh generation.
    fn begin_round(&mut self) {
        let generation = self.state.generation.next();
        self.state.generation = generation;
        let cancelled = self.timeline.cancel_before(generation);
        if cancelled > 0 {
            log::trace!("cancelled {} timers from earlier rounds", cancelled);
        }
        self.darken_all();

        let profile = self.state.difficulty;
        let sequence = self.source.generate(&profile, self.state.score);
        debug_assert_eq!(
            sequence.len(),
            profile.sequence_length(self.state.score),
            "sequence source returned the wrong number of cells"
        );
        let plan = schedule(&sequence, profile.step_duration_ms, generation);

        self.state.sequence = sequence;
        self.state.progress.clear();
        self.transition(Phase::PlayingBack);

        let start = self.timeline.now_ms();
        for event in &plan.events {
            let at = start + event.start_offset_ms;
            self.timeline
                .schedule_at(at, generation, Timer::Blink(*event));
            let until_ms = at + event.duration_ms;
            self.timeline.schedule_at(
                until_ms,
                generation,
                Timer::Revert {
                    cell: event.cell,
                    until_ms,
                },
            );
        }
        self.timeline.schedule_at(
            start + plan.complete_at_ms,
            generation,
            Timer::PlaybackComplete,
        );
        log::debug!(
            "{}: playing {} cells every {}ms, input opens at {}ms",
            generation,
            plan.len(),
            profile.step_duration_ms * 3 / 2,
            start + plan.complete_at_ms
        );

        self.plan = Some(plan);
        self.check_invariants();
    }

    fn feedback_blink(&mut self, cell: Cell) {
        let duration_ms = self.state.difficulty.blink_ms();
        let generation = self.state.generation;
        let until_ms = self.timeline.now_ms() + duration_ms;
        self.light(cell, until_ms);
        self.outbox.push(GameEvent::Highlight(HighlightEvent {
            generation,
            cell,
            start_offset_ms: 0,
            duration_ms,
            kind: BlinkKind::Feedback,
        }));
        self.timeline
            .schedule_at(until_ms, generation, Timer::Revert { cell, until_ms });
    }

    fn light(&mut self, cell: Cell, until_ms: u64) {
        self.state.lit.insert(cell);
        self.lit_until.insert(cell, until_ms);
    }

    /// A newer blink on the same cell owns the cell until its own revert.
    fn revert(&mut self, cell: Cell, until_ms: u64) {
        if self.lit_until.get(&cell) != Some(&until_ms) {
            log::trace!("{} relit, keeping it on past {}ms", cell, until_ms);
            return;
        }
        self.lit_until.remove(&cell);
        if self.state.lit.remove(&cell) {
            self.outbox.push(GameEvent::Revert {
                cell,
                generation: self.state.generation,
            });
        }
    }

    /// Turn off every lit cell, e.g. when a round is cut short.
    fn darken_all(&mut self) {
        self.lit_until.clear();
        let lit = std::mem::take(&mut self.state.lit);
        for cell in lit {
            self.outbox.push(GameEvent::Revert {
                cell,
                generation: self.state.generation,
            });
        }
    }

    fn transition(&mut self, to: Phase) {
        let from = self.state.phase;
        debug_assert!(
            from.can_transition_to(to),
            "illegal transition {} -> {}",
            from.name(),
            to.name()
        );
        log::debug!("{}: {} -> {}", self.state.generation, from, to);
        self.history.record(StateTransition {
            from,
            to,
            at_ms: self.timeline.now_ms(),
            generation: self.state.generation,
            timestamp: Utc::now(),
        });
        self.state.phase = to;
        self.outbox.push(GameEvent::PhaseChanged { from, to });
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            let violations = invariants::describe(&self.state);
            assert!(
                violations.is_empty(),
                "round invariants violated: {}",
                violations.join("; ")
            );
        }
    }
}
