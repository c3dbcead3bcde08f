//! Per-round actor supervision.
//!
//! Every actor of a round runs as a tokio task in one [`JoinSet`]. An actor
//! that returns an error or panics is reported as a [`Fault`] instead of
//! dying silently; the round controller turns the first fault into a fatal
//! error. Shutting the set down cancels every actor at its next await.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::EngineError;

/// A failed actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub task: &'static str,
    pub reason: String,
}

impl From<Fault> for EngineError {
    fn from(fault: Fault) -> Self {
        EngineError::Fault {
            task: fault.task,
            reason: fault.reason,
        }
    }
}

/// The set and its closed flag share one lock, so a spawn never lands after
/// shutdown has taken the set.
#[derive(Default)]
struct Pool {
    set: JoinSet<()>,
    closed: bool,
}

#[derive(Clone)]
pub struct Actors {
    pool: Arc<Mutex<Pool>>,
    faults: mpsc::UnboundedSender<Fault>,
}

impl Actors {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Fault>) {
        let (faults, rx) = mpsc::unbounded_channel();
        let actors = Self {
            pool: Arc::new(Mutex::new(Pool::default())),
            faults,
        };
        (actors, rx)
    }

    /// Spawn a supervised actor. Ignored once the set has been shut down.
    pub fn spawn<F>(&self, task: &'static str, fut: F)
    where
        F: Future<Output = Result<(), EngineError>> + Send + 'static,
    {
        let mut pool = self.pool.lock();
        if pool.closed {
            tracing::trace!(task, "spawn after shutdown ignored");
            return;
        }
        while pool.set.try_join_next().is_some() {}
        let faults = self.faults.clone();
        pool.set.spawn(async move {
            let reason = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => return,
                Ok(Err(e)) => e.to_string(),
                Err(panic) => panic_message(panic),
            };
            tracing::error!(task, %reason, "actor failed");
            let _ = faults.send(Fault { task, reason });
        });
    }

    /// Number of actors not yet reaped.
    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        self.pool.lock().set.len()
    }

    #[cfg(test)]
    pub(crate) fn is_closed(&self) -> bool {
        self.pool.lock().closed
    }

    /// Cancel every actor and wait until all of them are gone.
    pub async fn shutdown(&self) {
        let mut set = {
            let mut pool = self.pool.lock();
            pool.closed = true;
            std::mem::take(&mut pool.set)
        };
        let count = set.len();
        set.shutdown().await;
        tracing::debug!(count, "actors halted");
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn error_is_reported_as_fault() {
        let (actors, mut faults) = Actors::new();
        actors.spawn("wave", async {
            Err(EngineError::Restart("boom".to_string()))
        });
        let fault = faults.recv().await.unwrap();
        assert_eq!(fault.task, "wave");
        assert!(fault.reason.contains("boom"));
    }

    #[tokio::test]
    async fn panic_is_reported_as_fault() {
        let (actors, mut faults) = Actors::new();
        actors.spawn("boss", async {
            if true {
                panic!("bad row");
            }
            Ok(())
        });
        let fault = faults.recv().await.unwrap();
        assert_eq!(fault.task, "boss");
        assert_eq!(fault.reason, "panicked: bad row");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_and_closes() {
        let (actors, mut faults) = Actors::new();
        actors.spawn("missile", async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        });
        assert_eq!(actors.active(), 1);

        actors.shutdown().await;
        assert_eq!(actors.active(), 0);
        assert!(actors.is_closed());

        actors.spawn("missile", async { Ok(()) });
        assert_eq!(actors.active(), 0);
        assert!(faults.try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawns_racing_shutdown_never_outlive_it() {
        let (actors, _faults) = Actors::new();
        let spawner = {
            let actors = actors.clone();
            tokio::spawn(async move {
                while !actors.is_closed() {
                    actors.spawn("enemy_missile", std::future::pending::<Result<(), EngineError>>());
                    tokio::task::yield_now().await;
                }
                actors.spawn("enemy_missile", std::future::pending::<Result<(), EngineError>>());
            })
        };

        tokio::time::sleep(Duration::from_millis(5)).await;
        actors.shutdown().await;
        spawner.await.unwrap();
        assert_eq!(actors.active(), 0);
    }
}
