//! Terminal front end: type cell numbers to repeat the sequence.

use anyhow::{Context, Result};
use clap::Parser;
use genius::builder::GameBuilder;
use genius::config::GameConfig;
use genius::core::{Cell, Difficulty, Phase};
use genius::game::{GameEvent, Intent, RoundState};
use genius::runtime::{run, Presenter};
use std::io::BufRead;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, Sender};

const HELP: &str = "\
keys: 1-9 pick a cell (several per line is fine)
      s   start / restart
      e m h  easy / medium / hard (applies on next start)
      q   quit";

#[derive(Parser, Debug)]
#[command(name = "genius", about = "Watch the cells blink, then repeat the sequence")]
struct Args {
    /// easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Fixed seed for reproducible sequences
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct Terminal;

impl Terminal {
    fn board(state: &RoundState) -> String {
        let mut rows = Vec::new();
        for row in 0..3u8 {
            let line: Vec<String> = (0..3u8)
                .map(|col| {
                    let index = row * 3 + col;
                    let lit = Cell::new(index).map_or(false, |c| state.lit().contains(&c));
                    if lit {
                        "[##]".to_string()
                    } else {
                        format!("[ {}]", index + 1)
                    }
                })
                .collect();
            rows.push(line.join(" "));
        }
        rows.join("\n")
    }
}

impl Presenter for Terminal {
    fn present(&mut self, event: &GameEvent, state: &RoundState) {
        match event {
            GameEvent::Highlight(_) => println!("\n{}", Self::board(state)),
            GameEvent::Revert { .. } => {}
            GameEvent::PhaseChanged { to, .. } => {
                if let Some(prompt) = to.prompt() {
                    println!("\n{prompt}");
                }
                if *to == Phase::AwaitingInput {
                    println!("{}", Self::board(state));
                }
            }
            GameEvent::ScoreChanged { score } => println!("Score: {score}"),
            GameEvent::DifficultySelected { difficulty } => {
                println!("Difficulty: {difficulty} (press s to start)")
            }
            GameEvent::RoundWon { message, .. } => println!("{message}"),
            GameEvent::RoundLost { message, score } => {
                println!("{message} Final score: {score}. Press s to play again.")
            }
        }
    }
}

fn parse_line(line: &str) -> Vec<Result<Intent, String>> {
    line.split_whitespace()
        .flat_map(|token| match token {
            "q" | "quit" | "exit" => vec![Ok(Intent::Quit)],
            "s" | "start" => vec![Ok(Intent::StartGame)],
            _ if token.chars().all(|c| c.is_ascii_digit()) => token
                .chars()
                .map(|c| {
                    let digit = c.to_digit(10).unwrap_or(0) as u8;
                    digit
                        .checked_sub(1)
                        .and_then(|index| Cell::new(index).ok())
                        .map(Intent::pick)
                        .ok_or_else(|| format!("no cell {c}, use 1-9"))
                })
                .collect(),
            _ => vec![token
                .parse::<Difficulty>()
                .map(Intent::set_difficulty)
                .map_err(|e| e.to_string())],
        })
        .collect()
}

/// Blocking stdin reader on its own thread, so shutdown never waits on it.
fn spawn_reader(tx: Sender<Intent>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for intent in parse_line(&line) {
                match intent {
                    Ok(intent) => {
                        if tx.blocking_send(intent).is_err() {
                            return;
                        }
                    }
                    Err(message) => eprintln!("{message}"),
                }
            }
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let config = config.validated()?;
    let mut game = GameBuilder::from_config(&config).build()?;

    println!("Genius ({})\n{HELP}", config.difficulty);
    let (tx, rx) = mpsc::channel(32);
    spawn_reader(tx);
    run(&mut game, rx, &mut Terminal).await;

    println!("Bye! Score: {}", game.score());
    Ok(())
}
