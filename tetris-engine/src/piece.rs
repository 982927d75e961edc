/// Active piece: shape matrix, board position and rotation
use serde::{Deserialize, Serialize};

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::catalog::{Color, TetrominoKind};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub const fn new(x: isize, y: isize) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: isize, dy: isize) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// Rotates a square matrix 90 degrees clockwise (transpose, then reverse rows).
pub fn rotate_clockwise(shape: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let n = shape.len();
    (0..n)
        .map(|i| (0..n).map(|j| shape[n - 1 - j][i]).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    kind: TetrominoKind,
    shape: Vec<Vec<bool>>,
    position: Position,
}

impl Tetromino {
    /// Piece of `kind` in its base orientation at `position`
    pub fn new(kind: TetrominoKind, position: Position) -> Self {
        Tetromino {
            kind,
            shape: kind.base_shape(),
            position,
        }
    }

    /// Piece of `kind` at the spawn position: horizontally centered, top row 0
    pub fn spawn(kind: TetrominoKind) -> Self {
        let width = kind.base_shape().len() as isize;
        let x = (BOARD_WIDTH / 2) as isize - width / 2;
        Self::new(kind, Position::new(x, 0))
    }

    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn shape(&self) -> &[Vec<bool>] {
        &self.shape
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Same piece moved by the given offset
    pub fn moved(&self, dx: isize, dy: isize) -> Tetromino {
        Tetromino {
            position: self.position.offset(dx, dy),
            ..self.clone()
        }
    }

    /// Same piece rotated clockwise around its own matrix; position is unchanged
    pub fn rotated(&self) -> Tetromino {
        Tetromino {
            shape: rotate_clockwise(&self.shape),
            ..self.clone()
        }
    }

    /// Check the shape is one of the four rotations of the kind's base shape and
    /// the matrix overlaps the board's column range and lies no lower than its floor
    pub fn validate(&self) -> Result<()> {
        let mut orientation = Tetromino::new(self.kind, self.position);
        let known = (0..4).any(|_| {
            let matches = orientation.shape == self.shape;
            orientation = orientation.rotated();
            matches
        });
        if !known {
            return Err(EngineError::InvalidState(format!(
                "shape is not a rotation of {:?}",
                self.kind
            )));
        }
        let n = self.shape.len() as isize;
        let Position { x, y } = self.position;
        if x <= -n || x >= BOARD_WIDTH as isize || y <= -n || y >= BOARD_HEIGHT as isize {
            return Err(EngineError::InvalidState(format!(
                "{:?} position ({}, {}) is out of range",
                self.kind, x, y
            )));
        }
        Ok(())
    }

    /// Local (x, y) offsets of occupied cells within the shape matrix
    pub fn local_cells(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.shape.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, occupied)| **occupied)
                .map(move |(x, _)| (x as isize, y as isize))
        })
    }

    /// Absolute board coordinates of occupied cells
    pub fn board_cells(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        let Position { x, y } = self.position;
        self.local_cells().map(move |(cx, cy)| (x + cx, y + cy))
    }
}
