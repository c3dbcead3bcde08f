//! Terminal layer.
//!
//! A small, game-oriented rendering layer: actors draw into a plain
//! [`FrameBuffer`] of characters, and a [`Renderer`] serializes the whole buffer
//! to the output device on every present. [`TerminalSession`] owns raw mode and
//! restores the terminal on every exit path.

pub mod fb;
pub mod renderer;
pub mod session;

pub use tty_invaders_core as core;
pub use tty_invaders_types as types;

pub use fb::FrameBuffer;
pub use renderer::{encode_full_into, Renderer};
pub use session::{query_geometry, restore_terminal, StartupError, TerminalSession};
