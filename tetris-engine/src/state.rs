/// Game state machine: board, active and next piece, score and flags.
///
/// Every transition takes the current snapshot and returns a new one; the
/// receiver is never modified. Illegal moves leave the state unchanged.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::catalog::TetrominoKind;
use crate::collision::{collides, hard_drop_offset};
use crate::piece::Tetromino;

/// Points awarded for clearing `lines` rows with a single lock
pub fn score_for_lines(lines: usize) -> u64 {
    match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    }
}

// Enum with all user actions the engine understands
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    // No active piece, next spawn pending
    Spawning,
    Active,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current: Option<Tetromino>,
    next: Tetromino,
    score: u64,
    lines: u64,
    pieces_locked: u64,
    game_over: bool,
    paused: bool,
}

impl GameState {
    /// Fresh game: empty board, two randomly drawn pieces
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let current = Tetromino::spawn(TetrominoKind::random(rng));
        let next = Tetromino::spawn(TetrominoKind::random(rng));
        Self::from_parts(Board::create_empty(), Some(current), next)
    }

    pub(crate) fn from_parts(board: Board, current: Option<Tetromino>, next: Tetromino) -> Self {
        GameState {
            board,
            current,
            next,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            game_over: false,
            paused: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board with the active piece drawn over it
    pub fn display_board(&self) -> Board {
        self.board.with_overlay(self.current.as_ref())
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else if self.current.is_none() {
            Phase::Spawning
        } else {
            Phase::Active
        }
    }

    /// True when no piece is active and the game is still running
    pub fn needs_spawn(&self) -> bool {
        self.current.is_none() && !self.game_over
    }

    // Active piece, if the game accepts piece transitions right now
    fn controllable(&self) -> Option<&Tetromino> {
        if self.game_over || self.paused {
            return None;
        }
        self.current.as_ref()
    }

    fn with_current(&self, piece: Tetromino) -> GameState {
        GameState {
            current: Some(piece),
            ..self.clone()
        }
    }

    /// Promote the next piece to current and draw a new next piece.
    /// If the promoted piece collides at its spawn position the game is over and
    /// nothing else changes.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        if self.game_over {
            return self.clone();
        }
        let piece = self.next.clone();
        if collides(&self.board, &piece, 0, 0) {
            tracing::info!(score = self.score, lines = self.lines, "game over");
            return GameState {
                game_over: true,
                ..self.clone()
            };
        }
        GameState {
            current: Some(piece),
            next: Tetromino::spawn(TetrominoKind::random(rng)),
            ..self.clone()
        }
    }

    /// One row down, or lock the piece if it cannot move further
    pub fn descend(&self) -> GameState {
        let Some(piece) = self.controllable() else {
            return self.clone();
        };
        if collides(&self.board, piece, 0, 1) {
            self.lock(piece)
        } else {
            self.with_current(piece.moved(0, 1))
        }
    }

    /// Move the active piece one column left (`dir < 0`) or right (`dir > 0`)
    pub fn move_horizontal(&self, dir: isize) -> GameState {
        let Some(piece) = self.controllable() else {
            return self.clone();
        };
        let dx = dir.signum();
        if dx == 0 || collides(&self.board, piece, dx, 0) {
            return self.clone();
        }
        self.with_current(piece.moved(dx, 0))
    }

    pub fn move_left(&self) -> GameState {
        self.move_horizontal(-1)
    }

    pub fn move_right(&self) -> GameState {
        self.move_horizontal(1)
    }

    pub fn soft_drop(&self) -> GameState {
        self.descend()
    }

    /// Rotate clockwise in place; rejected if the rotated piece collides
    pub fn rotate(&self) -> GameState {
        let Some(piece) = self.controllable() else {
            return self.clone();
        };
        let rotated = piece.rotated();
        if collides(&self.board, &rotated, 0, 0) {
            return self.clone();
        }
        self.with_current(rotated)
    }

    /// Drop the active piece to its landing row and lock it
    pub fn hard_drop(&self) -> GameState {
        let Some(piece) = self.controllable() else {
            return self.clone();
        };
        let dy = hard_drop_offset(&self.board, piece);
        self.lock(&piece.moved(0, dy))
    }

    pub fn toggle_pause(&self) -> GameState {
        if self.game_over {
            return self.clone();
        }
        GameState {
            paused: !self.paused,
            ..self.clone()
        }
    }

    pub fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        tracing::info!(score = self.score, "game reset");
        GameState::new(rng)
    }

    // Merge piece into the board, clear full lines and update score
    fn lock(&self, piece: &Tetromino) -> GameState {
        let (board, lines_cleared) = self.board.merge(piece).clear_full_lines();
        let gained = score_for_lines(lines_cleared);
        tracing::debug!(kind = ?piece.kind(), lines_cleared, gained, "piece locked");
        GameState {
            board,
            current: None,
            score: self.score + gained,
            lines: self.lines + lines_cleared as u64,
            pieces_locked: self.pieces_locked + 1,
            ..self.clone()
        }
    }

    /// Spawn the next piece if one is needed
    pub fn settle<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        if self.needs_spawn() {
            self.spawn(rng)
        } else {
            self.clone()
        }
    }

    /// Apply a user action followed by any pending spawn
    pub fn apply<R: Rng + ?Sized>(&self, action: Action, rng: &mut R) -> GameState {
        let state = match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.soft_drop(),
            Action::Rotate => self.rotate(),
            Action::HardDrop => self.hard_drop(),
            Action::TogglePause => self.toggle_pause(),
            Action::Reset => self.reset(rng),
        };
        state.settle(rng)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot, rejecting any that break the board or piece invariants
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let state: GameState = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    fn validate(&self) -> crate::Result<()> {
        self.board.validate()?;
        if let Some(current) = &self.current {
            current.validate()?;
        }
        self.next.validate()
    }
}
