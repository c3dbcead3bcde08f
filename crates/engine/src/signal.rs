//! Cross-actor notifications.
//!
//! [`Signal`] is a one-slot notification: a send while one is already pending
//! is dropped instead of blocking the sender. [`Rendezvous`] lets a driver wait
//! until every missile it launched has drawn its first frame.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{Mutex, Notify};

/// Cell a player missile ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub row: u16,
    pub col: u16,
}

/// Why the round is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Critical {
    ShieldDepleted,
    Breach,
    NearMiss,
}

impl Critical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Critical::ShieldDepleted => "shield depleted",
            Critical::Breach => "breach",
            Critical::NearMiss => "near miss",
        }
    }
}

/// Capacity-one notification channel.
pub struct Signal<T> {
    name: &'static str,
    tx: mpsc::Sender<T>,
    rx: Mutex<mpsc::Receiver<T>>,
}

impl<T> Signal<T> {
    pub fn new(name: &'static str) -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            name,
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Post `value` without blocking.
    ///
    /// Returns `false` when a value was already pending; the new one is dropped.
    pub fn fire(&self, value: T) -> bool {
        match self.tx.try_send(value) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!(signal = self.name, "already pending, dropped");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.tx.capacity() == 0
    }

    /// Wait for the next value. Cancel safe.
    pub async fn wait(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }

    /// Consume the pending value, if any, without waiting.
    pub fn take(&self) -> Option<T> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }
}

/// Join point between a descending driver and the missiles it launched.
///
/// Each launched missile holds a [`Ticket`]; [`Rendezvous::wait`] resolves
/// once every outstanding ticket has arrived.
#[derive(Debug, Default)]
pub struct Rendezvous {
    pending: AtomicUsize,
    notify: Notify,
}

impl Rendezvous {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn register(self: &Arc<Self>) -> Ticket {
        self.pending.fetch_add(1, Ordering::SeqCst);
        Ticket {
            rendezvous: Arc::clone(self),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        loop {
            // Register before checking, so an arrival in between still wakes us.
            let notified = self.notify.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn arrive(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }
}

/// Outstanding arrival at a [`Rendezvous`]. Arrives when dropped.
#[derive(Debug)]
pub struct Ticket {
    rendezvous: Arc<Rendezvous>,
}

impl Ticket {
    pub fn arrive(self) {}
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.rendezvous.arrive();
    }
}
