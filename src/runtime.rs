//! Real-time driver.
//!
//! Maps the wall clock onto a [`Game`]'s virtual clock with tokio timers:
//! the loop sleeps until the next game deadline or the next [`Intent`],
//! whichever comes first, and hands every emitted event to a
//! [`Presenter`].

use crate::core::SequenceSource;
use crate::game::{Game, GameEvent, Intent, RoundState};
use tokio::sync::mpsc::Receiver;
use tokio::time::{sleep_until, Duration, Instant};

/// Renders what the game emits.
pub trait Presenter {
    fn present(&mut self, event: &GameEvent, state: &RoundState);
}

/// Collects events, mostly for tests and replays.
impl Presenter for Vec<GameEvent> {
    fn present(&mut self, event: &GameEvent, _state: &RoundState) {
        self.push(event.clone());
    }
}

/// Drive `game` until [`Intent::Quit`] arrives or `intents` closes.
pub async fn run<G, P>(game: &mut Game<G>, mut intents: Receiver<Intent>, presenter: &mut P)
where
    G: SequenceSource,
    P: Presenter + ?Sized,
{
    let started = Instant::now();
    let epoch = started
        .checked_sub(Duration::from_millis(game.now_ms()))
        .unwrap_or(started);
    let elapsed_ms = || epoch.elapsed().as_millis() as u64;
    log::debug!("driver started at game time {}ms", game.now_ms());

    loop {
        flush(game, presenter);
        let deadline = game.next_deadline_ms();
        let wake_at = epoch + Duration::from_millis(deadline.unwrap_or_default());

        tokio::select! {
            intent = intents.recv() => {
                game.advance_to(elapsed_ms());
                match intent {
                    Some(intent) => {
                        log::trace!("intent {:?} at {}ms", intent, game.now_ms());
                        if !game.handle(intent) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = sleep_until(wake_at), if deadline.is_some() => {
                game.advance_to(elapsed_ms());
            }
        }
    }

    flush(game, presenter);
    log::debug!("driver stopped at game time {}ms", game.now_ms());
}

fn flush<G, P>(game: &mut Game<G>, presenter: &mut P)
where
    G: SequenceSource,
    P: Presenter + ?Sized,
{
    for event in game.drain_events() {
        presenter.present(&event, game.state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Difficulty, Phase, ScriptedCells};
    use crate::game::Settings;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    fn game() -> Game<ScriptedCells> {
        Game::with_source(
            ScriptedCells::from_indices(&[2, 5, 1, 7]).unwrap(),
            Difficulty::Easy,
            Settings::default(),
        )
    }

    fn pick(index: u8) -> Intent {
        Intent::pick(Cell::new(index).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn plays_a_round_in_real_time() {
        let mut game = game();
        let mut events: Vec<GameEvent> = Vec::new();
        let (tx, rx) = mpsc::channel(8);

        let script = async move {
            tx.send(Intent::StartGame).await.unwrap();
            sleep(Duration::from_millis(4100)).await;
            for index in [2, 5, 1] {
                tx.send(pick(index)).await.unwrap();
            }
            sleep(Duration::from_millis(1500)).await;
            tx.send(Intent::Quit).await.unwrap();
        };
        tokio::join!(run(&mut game, rx, &mut events), script);

        assert_eq!(game.score(), 1);
        assert_eq!(game.phase(), Phase::PlayingBack);
        assert_eq!(game.sequence().len(), 4);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundWon { score: 1, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn picks_before_playback_ends_are_ignored() {
        let mut game = game();
        let mut events: Vec<GameEvent> = Vec::new();
        let (tx, rx) = mpsc::channel(8);

        let script = async move {
            tx.send(Intent::StartGame).await.unwrap();
            sleep(Duration::from_millis(3500)).await;
            tx.send(pick(2)).await.unwrap();
            sleep(Duration::from_millis(1000)).await;
        };
        tokio::join!(run(&mut game, rx, &mut events), script);

        assert_eq!(game.phase(), Phase::AwaitingInput);
        assert!(game.progress().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_channel_stops_the_driver() {
        let mut game = game();
        let mut events: Vec<GameEvent> = Vec::new();
        let (tx, rx) = mpsc::channel::<Intent>(1);
        drop(tx);

        run(&mut game, rx, &mut events).await;
        assert_eq!(game.phase(), Phase::Idle);
        assert!(events.is_empty());
    }
}
