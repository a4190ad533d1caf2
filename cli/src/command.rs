use std::str::FromStr;

use mineplay_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Hint,
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, type `?` for help")]
    Empty,
    #[error("Unknown command `{0}`, type `?` for help")]
    Unknown(String),
    #[error("Expected `<row> <col>` after `{0}`")]
    MissingCoords(String),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
}

pub const HELP: &str = "\
r <row> <col>  reveal a cell
f <row> <col>  toggle a flag
h              ask for a hint
n              start a new game
q              quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(verb, &mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(verb, &mut words)?),
            "h" | "hint" => Command::Hint,
            "n" | "new" | "restart" => Command::NewGame,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };
        Ok(command)
    }
}

fn parse_coords<'a>(
    verb: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let word = words
            .next()
            .ok_or_else(|| CommandError::MissingCoords(verb.to_owned()))?;
        word.parse()
            .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}
