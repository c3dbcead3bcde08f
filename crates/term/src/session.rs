//! Terminal session: raw mode acquisition and guaranteed restoration.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, terminal, QueueableCommand};
use thiserror::Error;

use tty_invaders_core::{Geometry, GeometryError};
use tty_invaders_types::{EXIT_RAW_MODE, EXIT_RUNTIME};

/// Fatal startup conditions, each with its own exit code.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("terminal size query failed: {0}")]
    Query(#[source] io::Error),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("cannot switch the terminal to raw mode: {0}")]
    RawMode(#[source] io::Error),
}

impl StartupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::Query(_) => EXIT_RUNTIME,
            StartupError::Geometry(e) => e.exit_code(),
            StartupError::RawMode(_) => EXIT_RAW_MODE,
        }
    }
}

/// Query the terminal size and validate it.
pub fn query_geometry() -> Result<Geometry, StartupError> {
    let (cols, rows) = terminal::size().map_err(StartupError::Query)?;
    Ok(Geometry::new(rows, cols)?)
}

/// Scoped raw-mode acquisition.
///
/// The previous terminal mode is restored by [`TerminalSession::restore`] or,
/// failing that, when the session is dropped.
pub struct TerminalSession {
    stdout: io::Stdout,
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self, StartupError> {
        terminal::enable_raw_mode().map_err(StartupError::RawMode)?;
        let mut session = Self {
            stdout: io::stdout(),
            active: true,
        };
        if let Err(e) = session.prepare_screen() {
            let _ = session.restore();
            return Err(StartupError::RawMode(e));
        }
        Ok(session)
    }

    fn prepare_screen(&mut self) -> io::Result<()> {
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.flush()
    }

    /// Show the cursor, clear, and leave raw mode. Idempotent.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore_terminal()?;
        Ok(())
    }
}

/// Undo everything [`TerminalSession::enter`] did.
///
/// Usable without a session, from a panic hook or right before the process
/// image is replaced.
pub fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.queue(cursor::Show)?;
    stdout.queue(cursor::MoveTo(0, 0))?;
    stdout.queue(terminal::Clear(terminal::ClearType::All))?;
    stdout.queue(terminal::LeaveAlternateScreen)?;
    stdout.flush()?;
    terminal::disable_raw_mode()
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
