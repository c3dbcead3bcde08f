//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Action`] and runs the
//! blocking reader that feeds the round's input dispatcher one action at a
//! time.

pub mod map;
pub mod reader;

pub use tty_invaders_types as types;

pub use map::{map_byte, map_key};
pub use reader::{forward_events, spawn_reader};
