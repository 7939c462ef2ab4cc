//! Property-based tests for sequence generation, playback planning and the
//! game state machine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use genius::core::{
    Cell, Difficulty, Generation, Phase, RandomSequence, Sequence, SequenceSource, State,
    CELL_COUNT,
};
use genius::game::{invariants, Game, GameEvent, PickOutcome};
use genius::playback::schedule;
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_difficulty()(variant in 0..3usize) -> Difficulty {
        Difficulty::ALL[variant]
    }
}

prop_compose! {
    fn arbitrary_cell()(index in 0..CELL_COUNT) -> Cell {
        Cell::new(index).unwrap()
    }
}

prop_compose! {
    fn arbitrary_sequence()(cells in prop::collection::vec(arbitrary_cell(), 0..20)) -> Sequence {
        Sequence::from(cells)
    }
}

/// A game whose first round is waiting for input.
fn awaiting_input(seed: u64, difficulty: Difficulty) -> Game {
    let mut game = Game::seeded(seed, difficulty);
    game.start_game();
    let complete_at = game.playback_plan().unwrap().complete_at_ms;
    game.advance_to(complete_at);
    assert_eq!(game.phase(), Phase::AwaitingInput);
    game.drain_events();
    game
}

/// A cell guaranteed to differ from `cell`.
fn other_than(cell: Cell, shift: u8) -> Cell {
    Cell::new((cell.index() + shift) % CELL_COUNT).unwrap()
}

proptest! {
    #[test]
    fn generated_length_follows_score(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
        score in 0u32..40,
    ) {
        let profile = difficulty.profile();
        let sequence = RandomSequence::seeded(seed).generate(&profile, score);

        prop_assert_eq!(sequence.len(), profile.base_length + score as usize);
        prop_assert!(sequence.iter().all(|c| c.index() < CELL_COUNT));
    }

    #[test]
    fn seeded_generation_is_reproducible(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
        score in 0u32..10,
    ) {
        let profile = difficulty.profile();
        let a = RandomSequence::seeded(seed).generate(&profile, score);
        let b = RandomSequence::seeded(seed).generate(&profile, score);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn playback_timing(
        sequence in arbitrary_sequence(),
        step in 1u64..2000,
        generation in 0u64..100,
    ) {
        let mut tag = Generation::default();
        for _ in 0..generation {
            tag = tag.next();
        }
        let plan = schedule(&sequence, step, tag);

        prop_assert_eq!(plan.events.len(), sequence.len());
        for (k, event) in plan.events.iter().enumerate() {
            prop_assert_eq!(event.start_offset_ms, k as u64 * step * 3 / 2);
            prop_assert_eq!(event.duration_ms, step / 2);
            prop_assert_eq!(event.cell, sequence[k]);
            prop_assert_eq!(event.generation, tag);
        }
        if !sequence.is_empty() {
            let last = (sequence.len() as u64 - 1) * step * 3 / 2;
            prop_assert!(plan.complete_at_ms >= last + step);
            prop_assert!(plan.events.iter().all(|e| e.start_offset_ms + e.duration_ms <= plan.complete_at_ms));
        }
    }

    #[test]
    fn picks_during_playback_change_nothing(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
        picks in prop::collection::vec(arbitrary_cell(), 1..10),
        into_playback in 0u64..1000,
    ) {
        let mut game = Game::seeded(seed, difficulty);
        game.start_game();
        let complete_at = game.playback_plan().unwrap().complete_at_ms;
        game.advance_to(into_playback.min(complete_at - 1));
        game.drain_events();
        let before = game.snapshot();

        for cell in picks {
            prop_assert_eq!(game.on_player_pick(cell), PickOutcome::Ignored);
        }

        prop_assert_eq!(game.snapshot(), before);
        prop_assert!(game.drain_events().is_empty());
    }

    #[test]
    fn picks_before_start_change_nothing(
        seed in any::<u64>(),
        picks in prop::collection::vec(arbitrary_cell(), 1..10),
    ) {
        let mut game = Game::seeded(seed, Difficulty::Easy);
        let before = game.snapshot();
        for cell in picks {
            prop_assert_eq!(game.on_player_pick(cell), PickOutcome::Ignored);
        }
        prop_assert_eq!(game.snapshot(), before);
        prop_assert!(game.drain_events().is_empty());
    }

    #[test]
    fn repeating_the_sequence_wins_on_the_last_pick(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
    ) {
        let mut game = awaiting_input(seed, difficulty);
        let cells: Vec<Cell> = game.sequence().iter().collect();
        let last = cells.len() - 1;

        for (i, cell) in cells.into_iter().enumerate() {
            let outcome = game.on_player_pick(cell);
            if i < last {
                prop_assert_eq!(outcome, PickOutcome::Accepted);
                prop_assert_eq!(game.phase(), Phase::AwaitingInput);
            } else {
                prop_assert_eq!(outcome, PickOutcome::Completed);
            }
        }

        prop_assert_eq!(game.phase(), Phase::RoundWon);
        prop_assert_eq!(game.score(), 1);
        prop_assert!(invariants::check(game.state()).is_success());
    }

    #[test]
    fn first_divergence_loses_and_freezes_the_round(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
        at in 0usize..7,
        shift in 1u8..CELL_COUNT,
        later in prop::collection::vec(arbitrary_cell(), 0..5),
    ) {
        let mut game = awaiting_input(seed, difficulty);
        let cells: Vec<Cell> = game.sequence().iter().collect();
        let at = at % cells.len();

        for cell in &cells[..at] {
            prop_assert_eq!(game.on_player_pick(*cell), PickOutcome::Accepted);
        }
        let expected = cells[at];
        prop_assert_eq!(
            game.on_player_pick(other_than(expected, shift)),
            PickOutcome::Mismatch { position: at, expected }
        );
        prop_assert_eq!(game.phase(), Phase::RoundLost);
        prop_assert_eq!(game.score(), 0);

        let frozen = game.snapshot();
        game.drain_events();
        for cell in later {
            prop_assert_eq!(game.on_player_pick(cell), PickOutcome::Ignored);
        }
        prop_assert_eq!(game.snapshot(), frozen);
        prop_assert!(game.drain_events().is_empty());
    }

    #[test]
    fn restart_never_leaks_stale_highlights(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
        restart_at in 0u64..6000,
    ) {
        let mut game = Game::seeded(seed, difficulty);
        game.start_game();
        game.advance_to(restart_at);
        game.start_game();
        let current = game.generation();
        game.drain_events();

        game.advance_by(20_000);
        for event in game.drain_events() {
            if let GameEvent::Highlight(highlight) = event {
                prop_assert_eq!(highlight.generation, current);
            }
        }
        prop_assert_eq!(game.phase(), Phase::AwaitingInput);
        prop_assert!(game.state().lit().is_empty());
    }

    #[test]
    fn history_path_only_takes_legal_steps(
        seed in any::<u64>(),
        difficulty in arbitrary_difficulty(),
        rounds in 1usize..4,
        lose in any::<bool>(),
    ) {
        let mut game = awaiting_input(seed, difficulty);
        for round in 0..rounds {
            let cells: Vec<Cell> = game.sequence().iter().collect();
            if lose && round + 1 == rounds {
                game.on_player_pick(other_than(cells[0], 1));
                break;
            }
            for cell in cells {
                game.on_player_pick(cell);
            }
            game.advance_by(60_000);
        }

        let path = game.history().get_path();
        prop_assert_eq!(path.first().copied(), Some(&Phase::Idle));
        for pair in path.windows(2) {
            prop_assert!(pair[0].can_transition_to(*pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        let last = *path.last().unwrap();
        prop_assert_eq!(last.is_final(), lose);
        prop_assert!(invariants::check(game.state()).is_success());
    }
}
