use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use mineplay_core::{FlagOutcome, GameEngine, HintOutcome, RevealOutcome};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use command::{Command, HELP};
use config::Args;

mod command;
mod config;
mod render;

fn report_reveal(out: &mut impl Write, outcome: &RevealOutcome) -> io::Result<()> {
    match outcome {
        RevealOutcome::Continue { revealed } => {
            log::debug!("Revealed {} cells", revealed.len());
            Ok(())
        }
        RevealOutcome::Won { mines, .. } => {
            writeln!(out, "You won the game! {} mines avoided.", mines.len())
        }
        RevealOutcome::Lost { triggered, .. } => {
            writeln!(
                out,
                "Game over, you hit a mine at {} {}.",
                triggered.0, triggered.1
            )
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.rows,
        config.cols,
        config.mines,
        seed
    );

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new_game(config, &mut rng)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    render::draw(&mut out, &engine)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::NewGame => engine.restart(config, &mut rng),
            Command::Reveal(coords) => match engine.reveal(coords) {
                Ok(outcome) => {
                    report_reveal(&mut out, &outcome)?;
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Command::Flag(coords) => engine.toggle_flag(coords).map(|outcome| {
                let state = match outcome {
                    FlagOutcome::Flagged => "flagged",
                    FlagOutcome::Unflagged => "unflagged",
                };
                log::debug!("Cell {:?} {}", coords, state);
            }),
            Command::Hint => {
                match engine.request_hint() {
                    HintOutcome::Hint((row, col)) => writeln!(out, "Try {row} {col}.")?,
                    HintOutcome::NoHintAvailable => writeln!(out, "No hint available.")?,
                }
                Ok(())
            }
        };

        if let Err(err) = result {
            log::warn!("{:?} rejected: {}", command, err);
            writeln!(out, "{err}")?;
        }
        render::draw(&mut out, &engine)?;
    }

    Ok(())
}
