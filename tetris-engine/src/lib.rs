//! # tetris-engine
//!
//! Rules engine for a falling-block puzzle game on a 10×20 board.
//!
//! ## Overview
//!
//! The game is modelled as an immutable [`GameState`] snapshot. Every operation
//! (move, rotate, soft drop, hard drop, pause, reset, timer tick) is a total
//! transition returning a new snapshot; illegal moves leave the state unchanged
//! and the only abnormal outcome is the terminal game-over phase.
//!
//! [`GameDriver`] runs the game loop: a fixed-interval timer that descends the
//! active piece and a command queue for player input, both handled one at a time
//! in `step()`. The timer only runs while the game is neither paused nor over.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tetris_engine::{Action, DriverCommand, EngineConfig, GameDriver, StepResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut driver = GameDriver::new(EngineConfig::default())?;
//!     driver.sender().send(DriverCommand::Action(Action::HardDrop))?;
//!
//!     while let StepResult::State(state) = driver.step().await {
//!         println!("score: {}", state.score());
//!         if state.is_game_over() {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod board;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod driver;
pub mod error;
pub mod piece;
pub mod state;

// Re-exports for convenience
pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
pub use catalog::{Color, TetrominoKind};
pub use collision::{collides, hard_drop_offset};
pub use config::EngineConfig;
pub use driver::{DriverCommand, GameDriver, StepResult};
pub use error::{EngineError, Result};
pub use piece::{Position, Tetromino, rotate_clockwise};
pub use state::{Action, GameState, Phase, score_for_lines};
