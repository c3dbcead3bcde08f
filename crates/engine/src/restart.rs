//! Restart strategies between rounds.

use crate::error::Result;

/// Carries out a restart once a round ended with
/// [`RoundEnd::Restart`](crate::RoundEnd::Restart).
///
/// Returning `Ok(())` lets the game loop start a fresh round in this process.
/// An implementation may instead replace the process and never return.
pub trait Restarter: Send {
    fn restart(&mut self) -> Result<()>;
}

impl<R: Restarter + ?Sized> Restarter for Box<R> {
    fn restart(&mut self) -> Result<()> {
        (**self).restart()
    }
}

/// Rebuild every entity in-process. The game loop re-queries the geometry.
#[derive(Debug, Default)]
pub struct InProcessRestart {
    restarts: u32,
}

impl InProcessRestart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

impl Restarter for InProcessRestart {
    fn restart(&mut self) -> Result<()> {
        self.restarts += 1;
        tracing::info!(restarts = self.restarts, "restarting in process");
        Ok(())
    }
}
