//! Round controller and the game loop.
//!
//! One [`Round`] owns a fresh [`Playfield`] and its actors. Its controller
//! multiplexes everything that can end a round: player actions, OS
//! notifications, the critical signal and actor faults. A round ends with a
//! [`RoundEnd`]; [`Game`] turns restarts into new rounds.

use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc;

use tty_invaders_core::Geometry;
use tty_invaders_term::StartupError;
use tty_invaders_types::{Action, EndCause, External, INPUT_DELAY_MS, TEMPO_C_MS};

use crate::actors::{Actors, Fault};
use crate::config::GameConfig;
use crate::deploy::deploy;
use crate::error::Result;
use crate::missile;
use crate::playfield::Playfield;
use crate::restart::Restarter;
use crate::sprite::{jump_sprite, move_sprite, wreck_sprite};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Quit,
    Restart,
}

pub struct Round {
    playfield: Arc<Playfield>,
    actors: Actors,
    faults: mpsc::UnboundedReceiver<Fault>,
}

impl Round {
    pub fn new(geometry: Geometry, config: GameConfig, output: Box<dyn Write + Send>) -> Self {
        let (actors, faults) = Actors::new();
        Self {
            playfield: Arc::new(Playfield::new(geometry, config, output)),
            actors,
            faults,
        }
    }

    pub fn playfield(&self) -> Arc<Playfield> {
        Arc::clone(&self.playfield)
    }

    /// Play the round to its end. Every actor is gone when this returns.
    pub async fn run(
        mut self,
        inputs: &mut mpsc::Receiver<Action>,
        externals: &mut mpsc::Receiver<External>,
    ) -> Result<RoundEnd> {
        let result = self.play(inputs, externals).await;
        self.playfield.begin_ending();
        self.actors.shutdown().await;
        result
    }

    async fn play(
        &mut self,
        inputs: &mut mpsc::Receiver<Action>,
        externals: &mut mpsc::Receiver<External>,
    ) -> Result<RoundEnd> {
        let pf = Arc::clone(&self.playfield);
        pf.init_screen()?;
        self.actors
            .spawn("deploy", deploy(Arc::clone(&pf), self.actors.clone()));

        loop {
            tokio::select! {
                biased;

                Some(fault) = self.faults.recv() => return Err(fault.into()),

                Some(cause) = pf.critical().wait() => {
                    tracing::info!(cause = cause.as_str(), score = pf.round_state().score(), "round lost");
                    return self.game_over(inputs, externals).await;
                }

                Some(event) = externals.recv() => match event {
                    External::Interrupt => {
                        tracing::info!("interrupted");
                        return Ok(RoundEnd::Quit);
                    }
                    External::Resize => {
                        tracing::info!("terminal resized");
                        self.ending(EndCause::Restart).await?;
                        return Ok(RoundEnd::Restart);
                    }
                },

                action = inputs.recv() => {
                    let Some(action) = action else {
                        tracing::warn!("input closed");
                        return Ok(RoundEnd::Quit);
                    };
                    if let Some(end) = self.dispatch(action).await? {
                        return Ok(end);
                    }
                }
            }
        }
    }

    /// Route one player action. Returns the round end it caused, if any.
    async fn dispatch(&mut self, action: Action) -> Result<Option<RoundEnd>> {
        let pf = Arc::clone(&self.playfield);
        tracing::trace!(action = action.as_str(), "dispatch");
        if action == Action::Quit {
            return Ok(Some(RoundEnd::Quit));
        }
        if !pf.is_stopped() {
            match action {
                Action::Move(dir) => {
                    move_sprite(&pf, dir)?;
                }
                Action::Jump(dir) => {
                    jump_sprite(&pf, dir)?;
                }
                Action::Fire => {
                    self.actors.spawn("missile", missile::launch(Arc::clone(&pf)));
                }
                Action::Reset => {
                    self.ending(EndCause::Restart).await?;
                    return Ok(Some(RoundEnd::Restart));
                }
                Action::Quit => {}
            }
        }
        pf.pause(INPUT_DELAY_MS).await;
        Ok(None)
    }

    async fn game_over(
        &mut self,
        inputs: &mut mpsc::Receiver<Action>,
        externals: &mut mpsc::Receiver<External>,
    ) -> Result<RoundEnd> {
        let pf = Arc::clone(&self.playfield);
        pf.stop();
        self.actors.shutdown().await;
        wreck_sprite(&pf).await?;
        self.ending(EndCause::GameOver).await?;

        loop {
            tokio::select! {
                Some(event) = externals.recv() => {
                    if event == External::Interrupt {
                        return Ok(RoundEnd::Quit);
                    }
                }
                action = inputs.recv() => match action {
                    Some(Action::Reset) => return Ok(RoundEnd::Restart),
                    Some(Action::Quit) | None => return Ok(RoundEnd::Quit),
                    Some(_) => {}
                },
            }
        }
    }

    /// Halt every actor and show the message box for `cause`.
    async fn ending(&mut self, cause: EndCause) -> Result<()> {
        let pf = Arc::clone(&self.playfield);
        pf.begin_ending();
        self.actors.shutdown().await;
        pf.draw_ending(cause)?;
        let round = pf.round_state();
        tracing::info!(?cause, score = round.score(), shield = round.shield(), "round over");
        if cause == EndCause::Restart {
            pf.pause(TEMPO_C_MS).await;
        }
        Ok(())
    }
}

/// Rounds in a loop until the player quits.
pub struct Game<R: Restarter> {
    config: GameConfig,
    restarter: R,
    rounds: u32,
}

impl<R: Restarter> Game<R> {
    pub fn new(config: GameConfig, restarter: R) -> Self {
        Self {
            config,
            restarter,
            rounds: 0,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn restarter(&self) -> &R {
        &self.restarter
    }

    /// Play rounds until one ends with [`RoundEnd::Quit`].
    ///
    /// `geometry` is queried before every round; `output` opens the device the
    /// round draws on.
    pub async fn run<G, O>(
        &mut self,
        mut geometry: G,
        mut output: O,
        inputs: &mut mpsc::Receiver<Action>,
        externals: &mut mpsc::Receiver<External>,
    ) -> Result<()>
    where
        G: FnMut() -> std::result::Result<Geometry, StartupError>,
        O: FnMut() -> Box<dyn Write + Send>,
    {
        loop {
            let g = geometry()?;
            self.rounds += 1;
            tracing::info!(round = self.rounds, rows = g.rows(), cols = g.cols(), "round start");
            let round = Round::new(g, self.config.clone(), output());
            match round.run(inputs, externals).await? {
                RoundEnd::Quit => return Ok(()),
                RoundEnd::Restart => self.restarter.restart()?,
            }
        }
    }
}
