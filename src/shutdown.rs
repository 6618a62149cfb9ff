//! Shutdown signalling between OS signal delivery and the poll loop.
//!
//! ```text
//!  SIGTERM / SIGINT ──▶ ctrlc handler thread ──▶ ShutdownTrigger
//!                                                      │ (channel)
//!  poll loop ◀── ShutdownSignal::wait_timeout ◀────────┘
//! ```
//!
//! The handler only sends on a channel.  The relay is touched solely by
//! the main thread, which wakes from its inter-poll wait as soon as the
//! trigger fires.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

use log::debug;

use crate::error::Error;

/// Cloneable, `Send` handle that requests shutdown.
#[derive(Clone)]
pub struct ShutdownTrigger {
    tx: SyncSender<()>,
}

impl ShutdownTrigger {
    /// Request shutdown.  Repeated calls are harmless.
    pub fn trigger(&self) {
        // Full: already pending.  Disconnected: the loop has already finished.
        let _ = self.tx.try_send(());
    }
}

/// Receiving half, owned by the poll loop.
pub struct ShutdownSignal {
    rx: Receiver<()>,
    tripped: bool,
}

impl ShutdownSignal {
    pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
        let (tx, rx) = mpsc::sync_channel(1);
        (
            ShutdownTrigger { tx },
            ShutdownSignal { rx, tripped: false },
        )
    }

    /// Route SIGTERM and SIGINT (and SIGHUP, via ctrlc's `termination`
    /// feature) to a new signal.  May only be called once per process.
    pub fn install_os_handlers() -> Result<ShutdownSignal, Error> {
        let (trigger, signal) = Self::channel();
        ctrlc::set_handler(move || trigger.trigger())
            .map_err(|e| Error::Init(format!("signal handler install failed: {e}")))?;
        debug!("shutdown: SIGTERM/SIGINT handlers installed");
        Ok(signal)
    }

    /// Block for up to `timeout`.  Returns `true` once shutdown was requested;
    /// stays `true` for every later call.
    pub fn wait_timeout(&mut self, timeout: Duration) -> bool {
        if self.tripped {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) => {
                self.tripped = true;
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            // Every trigger is gone, so nobody can ask us to stop any more.
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(timeout);
                false
            }
        }
    }
}
