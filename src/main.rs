//! TTY Invaders (default binary).
//!
//! Validates the terminal, switches it to raw mode and runs rounds until the
//! player quits. The terminal is restored before every exit.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{self, Command};
use std::sync::Mutex;
use std::{env, thread};

use anyhow::{Context, Result};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use tty_invaders::engine::{
    EngineError, Game, GameConfig, InProcessRestart, RestartMode, Restarter,
};
use tty_invaders::input::spawn_reader;
use tty_invaders::term::{query_geometry, restore_terminal, StartupError, TerminalSession};
use tty_invaders::types::{Action, External, EXIT_OK, EXIT_RUNTIME};

fn main() {
    let config = GameConfig::from_env();
    if let Err(e) = init_logging(&config) {
        eprintln!("tty-invaders: logging disabled: {e:#}");
    }

    let code = match run(config) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "fatal");
            eprintln!("tty-invaders: {e:#}");
            exit_code(&e)
        }
    };
    process::exit(code);
}

fn run(config: GameConfig) -> Result<()> {
    // Validate before touching the terminal mode.
    let geometry = query_geometry()?;
    let mut session = TerminalSession::enter()?;
    install_panic_hook();

    let result = play(config, geometry);

    // Always try to restore terminal state.
    settle(result, session.restore())
}

/// Combine the game's outcome with the terminal restore. An earlier failure
/// keeps its exit code; a failed restore is then only logged.
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Ok(()), restored) => restored.context("cannot restore the terminal"),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore)) => {
            tracing::error!(error = %format!("{restore:#}"), "cannot restore the terminal");
            Err(e)
        }
    }
}

fn play(config: GameConfig, geometry: tty_invaders::core::Geometry) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("tty-invaders-worker")
        .build()
        .context("cannot start the runtime")?;

    runtime.block_on(async move {
        let (action_tx, mut actions) = mpsc::channel::<Action>(16);
        let (event_tx, mut events) = mpsc::channel::<External>(4);
        spawn_reader(action_tx).context("cannot start the input reader")?;
        tokio::spawn(async move {
            if let Err(e) = forward_signals(event_tx).await {
                tracing::warn!(error = %e, "signal handling unavailable");
            }
        });

        let restarter: Box<dyn Restarter> = match config.restart {
            RestartMode::InProcess => Box::new(InProcessRestart::new()),
            RestartMode::Exec => Box::new(ExecRestart::new()),
        };
        tracing::info!(
            rows = geometry.rows(),
            cols = geometry.cols(),
            restart = ?config.restart,
            "starting"
        );

        let mut first = Some(geometry);
        let mut game = Game::new(config, restarter);
        game.run(
            move || match first.take() {
                Some(g) => Ok(g),
                None => query_geometry(),
            },
            || Box::new(io::stdout()),
            &mut actions,
            &mut events,
        )
        .await?;
        tracing::info!(rounds = game.rounds(), "bye");
        Ok(())
    })
}

/// Turn SIGINT and SIGWINCH into round events.
async fn forward_signals(tx: mpsc::Sender<External>) -> io::Result<()> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut resize = signal(SignalKind::window_change())?;
    loop {
        let event = tokio::select! {
            Some(()) = interrupt.recv() => External::Interrupt,
            Some(()) = resize.recv() => External::Resize,
            else => return Ok(()),
        };
        if tx.send(event).await.is_err() {
            return Ok(());
        }
    }
}

/// Restart by replacing the process image with a fresh copy of itself.
struct ExecRestart {
    args: Vec<OsString>,
}

impl ExecRestart {
    fn new() -> Self {
        Self {
            args: env::args_os().skip(1).collect(),
        }
    }
}

impl Restarter for ExecRestart {
    fn restart(&mut self) -> Result<(), EngineError> {
        let exe = env::current_exe().map_err(|e| EngineError::Restart(e.to_string()))?;
        tracing::info!(exe = %exe.display(), "re-executing");
        restore_terminal()?;
        // Only returns on failure.
        let err = Command::new(&exe).args(&self.args).exec();
        Err(EngineError::Restart(format!("{}: {err}", exe.display())))
    }
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {path}"))?;
    let filter = EnvFilter::try_from_env("TTY_INVADERS_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .init();
    Ok(())
}

/// Log every panic. A panic on the main thread also restores the terminal
/// first, so the message stays readable; actor panics are reported as faults.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        if thread::current().name() == Some("main") {
            let _ = restore_terminal();
            original(info);
        }
    }));
}

fn exit_code(e: &anyhow::Error) -> i32 {
    if let Some(e) = e.downcast_ref::<EngineError>() {
        return e.exit_code();
    }
    if let Some(e) = e.downcast_ref::<StartupError>() {
        return e.exit_code();
    }
    EXIT_RUNTIME
}
