//! Terminal front end for `tetris-engine`: key bindings and text rendering.

pub mod input;
pub mod logging;
pub mod term_render;

pub use input::{CONTROLS, command_for_key};
pub use term_render::{AnsiTermStyle, GameScreen, PlainTermStyle, TermRender, TermStyle};
