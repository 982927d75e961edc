/// Static piece catalog: the seven tetromino kinds, their base shapes and colors
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// RGB display color of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    // Hex notation, e.g. "#00f0f0"
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Base shapes, row-major, top row first. Every matrix is square.
const SHAPE_I: &[&[u8]] = &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]];
const SHAPE_O: &[&[u8]] = &[&[1, 1], &[1, 1]];
const SHAPE_T: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]];
const SHAPE_S: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]];
const SHAPE_Z: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]];
const SHAPE_J: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]];
const SHAPE_L: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]];

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    /// Uniform draw over all seven kinds, independent of any previous draw
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Base (unrotated) shape as a square matrix of occupied cells
    pub fn base_shape(&self) -> Vec<Vec<bool>> {
        let rows = match self {
            TetrominoKind::I => SHAPE_I,
            TetrominoKind::O => SHAPE_O,
            TetrominoKind::T => SHAPE_T,
            TetrominoKind::S => SHAPE_S,
            TetrominoKind::Z => SHAPE_Z,
            TetrominoKind::J => SHAPE_J,
            TetrominoKind::L => SHAPE_L,
        };
        rows.iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect()
    }

    pub fn color(&self) -> Color {
        match self {
            TetrominoKind::I => Color::rgb(0x00, 0xf0, 0xf0),
            TetrominoKind::O => Color::rgb(0xf0, 0xf0, 0x00),
            TetrominoKind::T => Color::rgb(0xa0, 0x00, 0xf0),
            TetrominoKind::S => Color::rgb(0x00, 0xf0, 0x00),
            TetrominoKind::Z => Color::rgb(0xf0, 0x00, 0x00),
            TetrominoKind::J => Color::rgb(0x00, 0x00, 0xf0),
            TetrominoKind::L => Color::rgb(0xf0, 0xa0, 0x00),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_every_shape_is_square_with_four_cells() {
        for kind in TetrominoKind::ALL {
            let shape = kind.base_shape();
            assert!(shape.iter().all(|row| row.len() == shape.len()), "{:?}", kind);
            let cells = shape.iter().flatten().filter(|&&c| c).count();
            assert_eq!(cells, 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(TetrominoKind::I.color().to_hex(), "#00f0f0");
        assert_eq!(TetrominoKind::L.color().to_string(), "#f0a000");
    }

    #[test]
    fn test_random_draw_reaches_every_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(TetrominoKind::random(&mut rng));
        }
        assert_eq!(seen.len(), 7);
    }
}
