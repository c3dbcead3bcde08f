//! Engine errors.
//!
//! None of these are recoverable inside a round: the binary restores the
//! terminal and exits with [`EngineError::exit_code`].

use std::io;

use thiserror::Error;

use tty_invaders_term::StartupError;
use tty_invaders_types::EXIT_RUNTIME;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cell (row {row}, col {col}) outside the {rows}x{cols} buffer")]
    OutOfBounds {
        row: u16,
        col: u16,
        rows: u16,
        cols: u16,
    },

    #[error("output device failed: {0}")]
    Output(#[from] io::Error),

    #[error("{task}: {reason}")]
    Fault { task: &'static str, reason: String },

    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("restart failed: {0}")]
    Restart(String),
}

impl EngineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Startup(e) => e.exit_code(),
            _ => EXIT_RUNTIME,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
