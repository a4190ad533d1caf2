use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// One board position as stored by the engine.
///
/// `adjacent_mines` is filled in when the board is generated, but a front end
/// should only show it once `state` is [`CellState::Revealed`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub state: CellState,
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }
}
