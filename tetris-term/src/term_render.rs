use tetris_engine::{Board, Cell, GameState, Tetromino, TetrominoKind};

#[derive(Clone, Debug, PartialEq)]
pub enum TermCell {
    FieldCell(Cell),
    BorderVertical,
    BorderHorizontal,
    BorderTopLeft,
    BorderTopRight,
    BorderBottomLeft,
    BorderBottomRight,
    Space,
    Message(String),
}

pub trait TermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str;
    fn width(&self, cell: &TermCell) -> usize;
}

pub trait TermRender {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>>;
    fn render(&self, style: &impl TermStyle) -> Vec<String> {
        self.output(style)
            .iter()
            .map(|row| row.iter().map(|cell| style.display(cell)).collect())
            .collect()
    }
}

// Width of cells shared by all styles
fn common_width(cell: &TermCell) -> usize {
    match cell {
        TermCell::FieldCell(_) | TermCell::BorderHorizontal => 2,
        TermCell::BorderVertical
        | TermCell::BorderTopLeft
        | TermCell::BorderTopRight
        | TermCell::BorderBottomLeft
        | TermCell::BorderBottomRight
        | TermCell::Space => 1,
        TermCell::Message(s) => console::measure_text_width(s),
    }
}

fn block_width(row: &[TermCell], style: &impl TermStyle) -> usize {
    row.iter().map(|cell| style.width(cell)).sum()
}

// Make all lines in block the same width by padding with TermCell::Space
pub fn pad_block_right(block: &mut [Vec<TermCell>], style: &impl TermStyle) {
    // Padding assumes TermCell::Space is one column wide
    debug_assert_eq!(style.width(&TermCell::Space), 1);
    let width = block.iter().map(|row| block_width(row, style)).max().unwrap_or(0);
    for row in block.iter_mut() {
        let padding = width - block_width(row, style);
        row.extend(std::iter::repeat_n(TermCell::Space, padding));
    }
}

// Replace the middle line of a block with a centered message
fn overlay_message(block: &mut [Vec<TermCell>], message: &str, style: &impl TermStyle) {
    if block.is_empty() {
        return;
    }
    let width = block_width(&block[0], style);
    let text_width = console::measure_text_width(message);
    let left = width.saturating_sub(text_width) / 2;
    let middle = block.len() / 2;
    let mut line = vec![TermCell::Space; left];
    line.push(TermCell::Message(message.to_string()));
    block[middle] = line;
    pad_block_right(block, style);
}

fn horizontal_border(cols: usize, left: TermCell, right: TermCell) -> Vec<TermCell> {
    let mut line = vec![left];
    line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, cols));
    line.push(right);
    line
}

pub struct PlainTermStyle;

impl TermStyle for PlainTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(Cell::Empty) => "  ",
            TermCell::FieldCell(Cell::Filled(_)) => "[]",
            TermCell::BorderVertical => "|",
            TermCell::BorderTopLeft
            | TermCell::BorderTopRight
            | TermCell::BorderBottomLeft
            | TermCell::BorderBottomRight => "+",
            TermCell::BorderHorizontal => "--",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        common_width(cell)
    }
}

pub struct AnsiTermStyle;

impl TermStyle for AnsiTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(Cell::Empty) => "\x1b[0m  ",
            TermCell::FieldCell(Cell::Filled(kind)) => match kind {
                TetrominoKind::I => "\x1b[0;36m[]",
                TetrominoKind::O => "\x1b[0;33m[]",
                TetrominoKind::T => "\x1b[0;35m[]",
                TetrominoKind::S => "\x1b[0;32m[]",
                TetrominoKind::Z => "\x1b[0;31m[]",
                TetrominoKind::J => "\x1b[0;34m[]",
                TetrominoKind::L => "\x1b[38;5;208m[]",
            },
            TermCell::BorderVertical => "\x1b[0m│",
            TermCell::BorderTopLeft => "\x1b[0m┌",
            TermCell::BorderTopRight => "\x1b[0m┐",
            TermCell::BorderBottomLeft => "\x1b[0m└",
            TermCell::BorderHorizontal => "\x1b[0m──",
            TermCell::BorderBottomRight => "\x1b[0m┘",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        common_width(cell)
    }
}

impl TermRender for Board {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        self.row_iter()
            .map(|row| row.iter().map(|&cell| TermCell::FieldCell(cell)).collect())
            .collect()
    }
}

/// The well: locked cells with the active piece drawn over them, framed on the
/// sides and bottom. Shows a message across the middle when paused or over.
pub struct WellField {
    board: Board,
    message: Option<&'static str>,
}

impl WellField {
    pub fn new(state: &GameState) -> Self {
        let message = if state.is_game_over() {
            Some("GAME OVER")
        } else if state.is_paused() {
            Some("PAUSED")
        } else {
            None
        };
        Self {
            board: state.display_board(),
            message,
        }
    }
}

impl TermRender for WellField {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = self.board.output(style);
        if let Some(message) = self.message {
            overlay_message(&mut lines, message, style);
        }
        for line in &mut lines {
            line.insert(0, TermCell::BorderVertical);
            line.push(TermCell::BorderVertical);
        }
        lines.push(horizontal_border(
            self.board.cols(),
            TermCell::BorderBottomLeft,
            TermCell::BorderBottomRight,
        ));
        lines
    }
}

/// Next piece centered in a square grid of at least 4×4 cells
pub struct PreviewField {
    cells: Vec<Vec<Cell>>,
}

impl PreviewField {
    pub fn new(piece: &Tetromino) -> Self {
        let size = piece.shape().len();
        let grid = size.max(4);
        let offset = ((grid - size) / 2) as isize;
        let mut cells = vec![vec![Cell::Empty; grid]; grid];
        for (x, y) in piece.local_cells() {
            cells[(y + offset) as usize][(x + offset) as usize] = Cell::Filled(piece.kind());
        }
        Self { cells }
    }
}

impl TermRender for PreviewField {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let cols = self.cells.first().map_or(0, |row| row.len());
        let mut lines = vec![horizontal_border(
            cols,
            TermCell::BorderTopLeft,
            TermCell::BorderTopRight,
        )];
        for row in &self.cells {
            let mut line = vec![TermCell::BorderVertical];
            line.extend(row.iter().map(|&cell| TermCell::FieldCell(cell)));
            line.push(TermCell::BorderVertical);
            lines.push(line);
        }
        lines.push(horizontal_border(
            cols,
            TermCell::BorderBottomLeft,
            TermCell::BorderBottomRight,
        ));
        lines
    }
}

/// Full screen: well on the left, next piece, score and help text on the right
pub struct GameScreen {
    well: WellField,
    preview: PreviewField,
    score: u64,
    lines: u64,
    pieces: u64,
    message: Vec<String>,
}

impl GameScreen {
    pub fn new(state: &GameState, message: Vec<String>) -> Self {
        Self {
            well: WellField::new(state),
            preview: PreviewField::new(state.next()),
            score: state.score(),
            lines: state.lines(),
            pieces: state.pieces_locked(),
            message,
        }
    }
}

impl TermRender for GameScreen {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut well_lines = self.well.output(style);
        let mut side_lines = vec![vec![TermCell::Message("NEXT".to_string())]];
        side_lines.extend(self.preview.output(style));
        side_lines.push(Vec::new());
        for (label, value) in [("SCORE", self.score), ("LINES", self.lines), ("PIECES", self.pieces)] {
            side_lines.push(vec![TermCell::Message(format!("{:<7}{}", label, value))]);
        }
        side_lines.push(Vec::new());
        side_lines.extend(
            self.message
                .iter()
                .map(|m| vec![TermCell::Message(m.clone())]),
        );

        pad_block_right(&mut well_lines, style);
        pad_block_right(&mut side_lines, style);
        let side_width = side_lines.first().map_or(0, |row| block_width(row, style));

        let total = well_lines.len().max(side_lines.len());
        let well_width = well_lines.first().map_or(0, |row| block_width(row, style));
        let mut lines = Vec::with_capacity(total);
        for i in 0..total {
            let mut line = match well_lines.get(i) {
                Some(row) => row.clone(),
                None => vec![TermCell::Space; well_width],
            };
            line.push(TermCell::Space);
            line.push(TermCell::Space);
            match side_lines.get(i) {
                Some(row) => line.extend(row.iter().cloned()),
                None => line.extend(std::iter::repeat_n(TermCell::Space, side_width)),
            }
            lines.push(line);
        }
        lines
    }
}
