/// Collision and placement checks of a piece against the board
use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use crate::piece::Tetromino;

/// Check if `piece`, shifted by (dx, dy), leaves the board through the walls or
/// the floor, or overlaps a filled cell. Cells above the top edge only collide
/// with the walls.
pub fn collides(board: &Board, piece: &Tetromino, dx: isize, dy: isize) -> bool {
    piece.board_cells().any(|(x, y)| {
        let (x, y) = (x + dx, y + dy);
        if x < 0 || x >= BOARD_WIDTH as isize || y >= BOARD_HEIGHT as isize {
            return true;
        }
        y >= 0 && !board.cell(x as usize, y as usize).is_empty()
    })
}

/// Largest downward offset the piece can travel before the next row would collide
pub fn hard_drop_offset(board: &Board, piece: &Tetromino) -> isize {
    let mut dy = 0;
    while !collides(board, piece, 0, dy + 1) {
        dy += 1;
    }
    dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::catalog::TetrominoKind;
    use crate::piece::Position;

    #[test]
    fn test_walls_and_floor() {
        let board = Board::create_empty();
        let piece = Tetromino::new(TetrominoKind::O, Position::new(8, 18));
        assert!(!collides(&board, &piece, 0, 0));
        assert!(collides(&board, &piece, 1, 0));
        assert!(collides(&board, &piece, 0, 1));
        assert!(!collides(&board, &piece, -8, 0));
        assert!(collides(&board, &piece, -9, 0));
    }

    #[test]
    fn test_cells_above_board_do_not_collide_with_contents() {
        let mut board = Board::create_empty();
        board.set_cell(4, 0, Cell::Filled(TetrominoKind::Z));
        let piece = Tetromino::new(TetrominoKind::O, Position::new(4, -2));
        assert!(!collides(&board, &piece, 0, 0));
        assert!(collides(&board, &piece, 0, 1));
        // Still bounded by the walls while above the board
        assert!(collides(&board, &piece, -5, 0));
    }

    #[test]
    fn test_overlap_with_filled_cell() {
        let mut board = Board::create_empty();
        board.set_cell(5, 10, Cell::Filled(TetrominoKind::J));
        let piece = Tetromino::new(TetrominoKind::O, Position::new(4, 9));
        assert!(collides(&board, &piece, 0, 0));
        assert!(!collides(&board, &piece, -1, -1));
    }

    #[test]
    fn test_hard_drop_offset_on_empty_board() {
        let board = Board::create_empty();
        let piece = Tetromino::spawn(TetrominoKind::O);
        assert_eq!(hard_drop_offset(&board, &piece), 18);
        // I in base orientation occupies its second matrix row
        let piece = Tetromino::spawn(TetrominoKind::I);
        assert_eq!(hard_drop_offset(&board, &piece), 18);
    }

    #[test]
    fn test_hard_drop_offset_lands_on_stack() {
        let mut board = Board::create_empty();
        board.set_cell(4, 15, Cell::Filled(TetrominoKind::S));
        let piece = Tetromino::spawn(TetrominoKind::O);
        let dy = hard_drop_offset(&board, &piece);
        assert_eq!(dy, 13);
        assert!(!collides(&board, &piece, 0, dy));
        assert!(collides(&board, &piece, 0, dy + 1));
    }

    #[test]
    fn test_hard_drop_offset_zero_when_resting() {
        let board = Board::create_empty();
        let piece = Tetromino::new(TetrominoKind::T, Position::new(0, 18));
        assert_eq!(hard_drop_offset(&board, &piece), 0);
    }
}
