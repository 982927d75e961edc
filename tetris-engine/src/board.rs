/// Board model: fixed-size grid of cells
use serde::{Deserialize, Serialize};

use crate::catalog::TetrominoKind;
use crate::error::{EngineError, Result};
use crate::piece::Tetromino;

/// Board width in cells
pub const BOARD_WIDTH: usize = 10;
/// Board height in cells
pub const BOARD_HEIGHT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    // Filled by a locked piece of the given kind
    Filled(TetrominoKind),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Grid of `BOARD_HEIGHT` rows, each of `BOARD_WIDTH` cells. Row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::create_empty()
    }
}

impl Board {
    pub fn create_empty() -> Self {
        Board {
            rows: (0..BOARD_HEIGHT).map(|_| Self::empty_row()).collect(),
        }
    }

    fn empty_row() -> Vec<Cell> {
        vec![Cell::Empty; BOARD_WIDTH]
    }

    pub fn cols(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn rows(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Cell at column `x`, row `y`. Out of range coordinates read as empty.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Check the board is exactly `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells
    pub fn validate(&self) -> Result<()> {
        if self.rows.len() != BOARD_HEIGHT {
            return Err(EngineError::InvalidState(format!(
                "board has {} rows, expected {}",
                self.rows.len(),
                BOARD_HEIGHT
            )));
        }
        if let Some((y, row)) = self.rows.iter().enumerate().find(|(_, row)| row.len() != BOARD_WIDTH) {
            return Err(EngineError::InvalidState(format!(
                "board row {} has {} cells, expected {}",
                y,
                row.len(),
                BOARD_WIDTH
            )));
        }
        Ok(())
    }

    // Writes inside bounds only
    pub(crate) fn set_cell(&mut self, x: isize, y: isize, cell: Cell) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as isize || y >= BOARD_HEIGHT as isize {
            return;
        }
        self.rows[y as usize][x as usize] = cell;
    }

    /// Returns a new board with the occupied cells of `piece` written into it.
    /// Cells falling outside the board are dropped.
    pub fn merge(&self, piece: &Tetromino) -> Board {
        let mut board = self.clone();
        let cell = Cell::Filled(piece.kind());
        for (x, y) in piece.board_cells() {
            board.set_cell(x, y, cell);
        }
        board
    }

    /// Board as it should be displayed: `piece` drawn over the locked cells.
    pub fn with_overlay(&self, piece: Option<&Tetromino>) -> Board {
        match piece {
            Some(piece) => self.merge(piece),
            None => self.clone(),
        }
    }

    /// Removes every full row and pads the top with empty rows.
    /// Returns the new board and the number of rows removed.
    pub fn clear_full_lines(&self) -> (Board, usize) {
        let mut rows: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| cell.is_empty()))
            .cloned()
            .collect();
        let lines_cleared = BOARD_HEIGHT - rows.len();
        let mut padded: Vec<Vec<Cell>> = (0..lines_cleared).map(|_| Self::empty_row()).collect();
        padded.append(&mut rows);
        (Board { rows: padded }, lines_cleared)
    }

    // Number of non-empty cells, used by tests and statistics
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Position;

    fn assert_dimensions(board: &Board) {
        assert_eq!(board.row_iter().count(), BOARD_HEIGHT);
        assert!(board.row_iter().all(|row| row.len() == BOARD_WIDTH));
    }

    #[test]
    fn test_create_empty() {
        let board = Board::create_empty();
        assert_dimensions(&board);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_merge_is_pure_and_clips() {
        let board = Board::create_empty();
        // O piece half above the top edge
        let piece = Tetromino::new(TetrominoKind::O, Position::new(0, -1));
        let merged = board.merge(&piece);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(merged.filled_count(), 2);
        assert_eq!(merged.cell(0, 0), Cell::Filled(TetrominoKind::O));
        assert_eq!(merged.cell(1, 0), Cell::Filled(TetrominoKind::O));
    }

    #[test]
    fn test_clear_full_lines_keeps_order_and_dimensions() {
        let mut board = Board::create_empty();
        for x in 0..BOARD_WIDTH as isize {
            board.set_cell(x, 19, Cell::Filled(TetrominoKind::I));
            board.set_cell(x, 17, Cell::Filled(TetrominoKind::I));
        }
        board.set_cell(3, 18, Cell::Filled(TetrominoKind::T));
        board.set_cell(5, 16, Cell::Filled(TetrominoKind::Z));

        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 2);
        assert_dimensions(&cleared);
        assert_eq!(cleared.filled_count(), 2);
        assert_eq!(cleared.cell(3, 19), Cell::Filled(TetrominoKind::T));
        assert_eq!(cleared.cell(5, 18), Cell::Filled(TetrominoKind::Z));
        assert!(cleared.row_iter().take(18).flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_full_lines_without_full_rows() {
        let mut board = Board::create_empty();
        board.set_cell(0, 19, Cell::Filled(TetrominoKind::L));
        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 0);
        assert_eq!(cleared, board);
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(Board::create_empty().validate().is_ok());

        let mut board = Board::create_empty();
        board.rows.pop();
        assert!(matches!(board.validate(), Err(EngineError::InvalidState(_))));

        let mut board = Board::create_empty();
        board.rows[7].truncate(3);
        assert!(matches!(board.validate(), Err(EngineError::InvalidState(_))));
    }

    #[test]
    fn test_overlay_does_not_touch_board() {
        let board = Board::create_empty();
        let piece = Tetromino::new(TetrominoKind::T, Position::new(4, 0));
        let view = board.with_overlay(Some(&piece));
        assert_eq!(view.filled_count(), 4);
        assert_eq!(board.with_overlay(None), board);
    }
}
