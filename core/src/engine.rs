use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from placement to win or loss.
///
/// Every mutating call returns a value describing which cells changed, so a
/// front end only needs the read-only queries for full redraws.
#[derive(Clone, Debug)]
pub struct GameEngine {
    layout: MineLayout,
    board: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    hint: Option<Coord2>,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl GameEngine {
    /// Starts a game with randomly placed mines.
    ///
    /// Mines are drawn from `rng`; the hint shuffler is then seeded from it too, so
    /// a seeded `rng` makes the whole game reproducible.
    pub fn new_game<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let layout = RandomMineGenerator::new(&mut *rng).generate(config)?;
        log::debug!(
            "New game {}x{} with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        Ok(Self::from_layout(layout, rng))
    }

    /// Starts a game on a known layout.
    pub fn from_layout<R: Rng>(layout: MineLayout, rng: &mut R) -> Self {
        let board = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell {
                is_mine: layout[coords],
                adjacent_mines: layout.adjacent_mine_count(coords),
                state: CellState::Hidden,
            }
        });

        Self {
            layout,
            board,
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::InProgress,
            hint: None,
            triggered_mine: None,
            rng: SmallRng::from_rng(rng),
        }
    }

    /// Replaces the whole board with a fresh game. On error the current game is kept.
    pub fn restart<R: Rng>(&mut self, config: GameConfig, rng: &mut R) -> Result<()> {
        *self = Self::new_game(config, rng)?;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    /// Number of safe cells opened so far, which doubles as the score.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn mines_left(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn hint(&self) -> Option<Coord2> {
        self.hint
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.layout.mine_coords()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.board
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Never fails: coordinates off the board simply hold no mine.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.layout.adjacent_mine_count(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.layout.validate_coords(coords)?;
        self.check_in_progress()?;

        let cell = &mut self.board[coords.to_nd_index()];
        match cell.state {
            Hidden => {
                cell.state = Flagged;
                self.flagged_count += 1;
                Ok(FlagOutcome::Flagged)
            }
            Flagged => {
                cell.state = Hidden;
                self.flagged_count -= 1;
                Ok(FlagOutcome::Unflagged)
            }
            Revealed => Err(GameError::InvalidAction),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        self.check_in_progress()?;

        if self.board[coords.to_nd_index()].state != CellState::Hidden {
            return Err(GameError::InvalidAction);
        }

        if self.layout[coords] {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            let mines = self.end_game(GameStatus::Lost);
            return Ok(RevealOutcome::Lost {
                triggered: coords,
                mines,
            });
        }

        let revealed = self.flood_reveal(coords);

        if let Some(hint) = self.hint {
            if revealed.iter().any(|cell| cell.coords == hint) {
                self.hint = None;
            }
        }

        if self.revealed_count == self.layout.safe_cell_count() {
            let mines = self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won { revealed, mines })
        } else {
            Ok(RevealOutcome::Continue { revealed })
        }
    }

    /// Suggests a hidden safe cell next to something already revealed.
    pub fn request_hint(&mut self) -> HintOutcome {
        if self.hint.is_some() || self.status.is_finished() || self.revealed_count == 0 {
            return HintOutcome::NoHintAvailable;
        }

        let mut sources: Vec<Coord2> = self
            .cells()
            .filter(|(_, cell)| cell.state == CellState::Revealed)
            .map(|(coords, _)| coords)
            .collect();
        sources.shuffle(&mut self.rng);

        let found = sources.iter().find_map(|&source| {
            self.layout.iter_neighbors(source).find(|&pos| {
                let cell = self.board[pos.to_nd_index()];
                cell.state == CellState::Hidden && !cell.is_mine
            })
        });

        match found {
            Some(coords) => {
                log::debug!("Hint at {:?}", coords);
                self.hint = Some(coords);
                HintOutcome::Hint(coords)
            }
            None => HintOutcome::NoHintAvailable,
        }
    }

    /// Opens a safe cell and, when it has no adjacent mines, the connected empty
    /// region around it. Each cell is opened at most once.
    fn flood_reveal(&mut self, coords: Coord2) -> Vec<RevealedCell> {
        let mut revealed = Vec::new();
        let start = self.open_cell(coords);
        revealed.push(start);

        if start.adjacent_mines != 0 {
            return revealed;
        }

        let mut visited = BTreeSet::from([coords]);
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(coords).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // flags stop the cascade
            if self.board[visit_coords.to_nd_index()].state != CellState::Hidden {
                continue;
            }

            let opened = self.open_cell(visit_coords);
            revealed.push(opened);

            if opened.adjacent_mines == 0 {
                to_visit.extend(
                    self.hidden_neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::trace!("Flood-fill from {:?} opened {} cells", coords, revealed.len());
        revealed
    }

    fn open_cell(&mut self, coords: Coord2) -> RevealedCell {
        let cell = &mut self.board[coords.to_nd_index()];
        cell.state = CellState::Revealed;
        self.revealed_count += 1;
        RevealedCell {
            coords,
            adjacent_mines: cell.adjacent_mines,
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.layout
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].state == CellState::Hidden)
    }

    /// Marks every mine as revealed for display and returns their coordinates.
    fn end_game(&mut self, status: GameStatus) -> Vec<Coord2> {
        self.status = status;
        self.hint = None;

        let mines = self.layout.mine_coords();
        for &coords in &mines {
            let cell = &mut self.board[coords.to_nd_index()];
            if cell.state == CellState::Flagged {
                self.flagged_count -= 1;
            }
            cell.state = CellState::Revealed;
        }

        log::debug!(
            "Game ended {:?} with {} cells revealed",
            status,
            self.revealed_count
        );
        mines
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
