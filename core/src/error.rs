use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration, need positive dimensions and fewer mines than cells")]
    InvalidConfiguration,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Action not allowed on this cell")]
    InvalidAction,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
