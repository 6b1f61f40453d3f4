//! Store guard acquisition
//!
//! The table and the cache share one `tokio::sync::RwLock`. Writers wait on it
//! unconditionally; the list path waits through the helpers below, which give
//! up as soon as the caller's [`InterruptSignal`] is raised.

use thiserror::Error;
use tokio::sync::{watch, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Returned when a lock wait was abandoned because the caller was interrupted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("interrupted while waiting for the store lock")]
pub struct Interrupted;

// == Interrupter ==
/// Raising side of an interrupt channel.
#[derive(Debug)]
pub struct Interrupter {
    tx: watch::Sender<bool>,
}

impl Interrupter {
    /// Raises the flag. Every signal subscribed to this interrupter sees it.
    pub fn interrupt(&self) {
        self.tx.send_replace(true);
    }

    /// Lowers the flag again.
    pub fn clear(&self) {
        self.tx.send_replace(false);
    }

    /// A new signal observing this interrupter.
    pub fn signal(&self) -> InterruptSignal {
        InterruptSignal {
            rx: self.tx.subscribe(),
        }
    }
}

// == Interrupt Signal ==
/// Observing side of an interrupt channel.
///
/// Observing a raised flag does not lower it: a caller that aborted because
/// of an interrupt still sees [`InterruptSignal::is_raised`] afterwards.
#[derive(Debug, Clone)]
pub struct InterruptSignal {
    rx: watch::Receiver<bool>,
}

impl InterruptSignal {
    /// A signal that can never be raised.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_raised(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the flag is raised. Pending forever if it cannot be.
    pub async fn raised(&mut self) {
        if self.rx.wait_for(|raised| *raised).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Creates a connected interrupter and signal, initially lowered.
pub fn interrupt_channel() -> (Interrupter, InterruptSignal) {
    let (tx, rx) = watch::channel(false);
    (Interrupter { tx }, InterruptSignal { rx })
}

// == Interruptible Acquisition ==
/// Waits for shared access unless `signal` is raised first.
///
/// An already-raised signal wins even when the lock is free.
pub async fn read_interruptibly<'a, T>(
    lock: &'a RwLock<T>,
    signal: &mut InterruptSignal,
) -> Result<RwLockReadGuard<'a, T>, Interrupted> {
    tokio::select! {
        biased;
        _ = signal.raised() => Err(Interrupted),
        guard = lock.read() => Ok(guard),
    }
}

/// Waits for exclusive access unless `signal` is raised first.
pub async fn write_interruptibly<'a, T>(
    lock: &'a RwLock<T>,
    signal: &mut InterruptSignal,
) -> Result<RwLockWriteGuard<'a, T>, Interrupted> {
    tokio::select! {
        biased;
        _ = signal.raised() => Err(Interrupted),
        guard = lock.write() => Ok(guard),
    }
}
