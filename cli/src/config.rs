use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineplay_core::{CellCount, Coord, GameConfig};

/// Play Minesweeper in the terminal
#[derive(Parser, Debug)]
#[command(name = "mineplay", version, long_about = None)]
pub struct Args {
    /// Number of rows (default 20)
    #[arg(long)]
    pub rows: Option<Coord>,

    /// Number of columns (default 20)
    #[arg(long)]
    pub cols: Option<Coord>,

    /// Number of mines (default 10)
    #[arg(long)]
    pub mines: Option<CellCount>,

    /// Seed for mine placement and hints, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML file with `rows`, `cols` and `mines`; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig> {
        let base = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                parse_config(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        let config = GameConfig {
            rows: self.rows.unwrap_or(base.rows),
            cols: self.cols.unwrap_or(base.cols),
            mines: self.mines.unwrap_or(base.mines),
        };
        config
            .validate()
            .with_context(|| format!("unusable game settings {config:?}"))
    }
}

pub fn parse_config(text: &str) -> Result<GameConfig> {
    Ok(toml::from_str(text)?)
}
