use std::io::{self, Write};

use mineplay_core::{Cell, CellState, Coord2, GameEngine, GameStatus};

fn glyph(engine: &GameEngine, coords: Coord2, cell: Cell) -> char {
    match cell.state {
        CellState::Flagged => 'F',
        CellState::Hidden if engine.hint() == Some(coords) => '?',
        CellState::Hidden => '#',
        CellState::Revealed if engine.triggered_mine() == Some(coords) => 'X',
        CellState::Revealed if cell.is_mine => '*',
        CellState::Revealed if cell.adjacent_mines == 0 => '.',
        CellState::Revealed => char::from(b'0' + cell.adjacent_mines),
    }
}

/// Renders the board with row/column labels and a score line.
pub fn render_board(engine: &GameEngine) -> String {
    let (rows, cols) = engine.size();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..cols {
        out.push_str(&format!("{:>3}", col));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{:>3}", row));
        for col in 0..cols {
            if let Ok(cell) = engine.cell_at((row, col)) {
                out.push_str(&format!("{:>3}", glyph(engine, (row, col), cell)));
            }
        }
        out.push('\n');
    }

    let status = match engine.status() {
        GameStatus::InProgress => "in progress",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    };
    out.push_str(&format!(
        "Score: {}  Mines left: {}  ({})\n",
        engine.revealed_count(),
        engine.mines_left(),
        status
    ));
    out
}

pub fn draw(out: &mut impl Write, engine: &GameEngine) -> io::Result<()> {
    out.write_all(render_board(engine).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineplay_core::MineLayout;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn engine(size: Coord2, mines: &[Coord2]) -> GameEngine {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        GameEngine::from_layout(layout, &mut SmallRng::seed_from_u64(1))
    }

    #[test]
    fn hidden_board_shows_labels_and_score() {
        let engine = engine((2, 3), &[(0, 0)]);

        assert_eq!(
            render_board(&engine),
            "     0  1  2\n  0  #  #  #\n  1  #  #  #\nScore: 0  Mines left: 1  (in progress)\n"
        );
    }

    #[test]
    fn shows_numbers_and_flags() {
        let mut engine = engine((1, 6), &[(0, 0), (0, 4)]);
        engine.reveal((0, 2)).unwrap();
        engine.toggle_flag((0, 0)).unwrap();

        let board = render_board(&engine);
        assert!(board.contains("  0  F  1  .  1  #  #\n"), "{board}");
        assert!(board.contains("Score: 3  Mines left: 1"));
    }

    #[test]
    fn lost_board_marks_triggered_mine() {
        let mut engine = engine((1, 3), &[(0, 0), (0, 2)]);
        engine.reveal((0, 2)).unwrap();

        let board = render_board(&engine);
        assert!(board.contains("  0  *  #  X\n"), "{board}");
        assert!(board.ends_with("(lost)\n"));
    }

    #[test]
    fn hint_is_drawn_as_question_mark() {
        let mut engine = engine((1, 3), &[(0, 0)]);
        engine.reveal((0, 1)).unwrap();
        engine.request_hint();

        assert!(render_board(&engine).contains("  0  #  1  ?\n"));
    }
}
