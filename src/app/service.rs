//! Application service — the hexagonal core.
//!
//! [`ModePoller`] owns the relay driver and the mode source.  All I/O
//! flows through the [`ModeSource`] port, an [`OutputPin`] and an
//! [`EventSink`] injected at call sites, so the whole control loop runs
//! against mocks in tests.
//!
//! ```text
//!  ModeSource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       ModePoller        │
//!   OutputPin ◀──│  read · apply · park    │
//!                 └────────────────────────┘
//! ```

use std::time::Duration;

use embedded_hal::digital::{OutputPin, PinState};

use crate::drivers::relay::RelayDriver;
use crate::error::{ReadError, RelayError};
use crate::shutdown::ShutdownSignal;

use super::events::{AppEvent, PollStats};
use super::mode::OperationMode;
use super::ports::{EventSink, ModeSource};

/// What a single poll cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A known mode was written to the relay.
    Applied(OperationMode),
    /// Unrecognised content; relay untouched.
    Ignored(String),
    /// The mode source could not be read; relay untouched.
    ReadFailed,
    /// The mode was known but the relay write failed.
    RelayFailed(RelayError),
}

// ───────────────────────────────────────────────────────────────
// ModePoller
// ───────────────────────────────────────────────────────────────

pub struct ModePoller<S: ModeSource, P: OutputPin> {
    source: S,
    relay: RelayDriver<P>,
    poll_interval: Duration,
    last_mode: Option<OperationMode>,
    stats: PollStats,
}

impl<S: ModeSource, P: OutputPin> ModePoller<S, P> {
    /// Take over `pin` (driving it deasserted) and bind it to `source`.
    ///
    /// Fails only if the initial write fails; the caller should treat that
    /// as fatal.
    pub fn new(source: S, pin: P, poll_interval: Duration) -> Result<Self, RelayError> {
        Ok(Self {
            source,
            relay: RelayDriver::new(pin)?,
            poll_interval,
            last_mode: None,
            stats: PollStats::default(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            pin: self.relay.level(),
            interval: self.poll_interval,
        });
    }

    /// Poll until `shutdown` fires, then park the relay.
    ///
    /// The wait between polls is the only suspension point and is cut
    /// short by the signal.
    pub fn run(&mut self, shutdown: &mut ShutdownSignal, sink: &mut impl EventSink) {
        loop {
            self.poll_once(sink);
            if shutdown.wait_timeout(self.poll_interval) {
                break;
            }
        }
        self.shutdown(sink);
    }

    /// Park and release the relay.  Returns `true` for the call that did
    /// it; later calls are no-ops.
    pub fn shutdown(&mut self, sink: &mut impl EventSink) -> bool {
        if !self.relay.release() {
            return false;
        }
        sink.emit(&AppEvent::Stopped(self.stats));
        true
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Read the source and apply whatever it says.  Never fails: every
    /// problem is reported through `sink` and the relay keeps its level.
    pub fn poll_once(&mut self, sink: &mut impl EventSink) -> PollOutcome {
        self.stats.polls += 1;
        sink.emit(&AppEvent::Polling);

        let mode = match self.read_mode() {
            Ok(mode) => mode,
            Err(e) => {
                self.stats.read_failures += 1;
                sink.emit(&AppEvent::ReadFailed {
                    location: e.path().to_path_buf(),
                    reason: e.kind().to_string(),
                });
                return PollOutcome::ReadFailed;
            }
        };

        sink.emit(&AppEvent::ModeRead {
            location: self.source.location().to_path_buf(),
            mode: mode.clone(),
        });

        match self.apply_mode(&mode, sink) {
            Ok(()) => match mode {
                OperationMode::Unknown(raw) => PollOutcome::Ignored(raw),
                known => PollOutcome::Applied(known),
            },
            Err(e) => {
                self.stats.relay_faults += 1;
                sink.emit(&AppEvent::RelayFault(e));
                PollOutcome::RelayFailed(e)
            }
        }
    }

    pub fn read_mode(&mut self) -> Result<OperationMode, ReadError> {
        self.source.read_mode()
    }

    /// Drive the relay for `mode`.  `Unknown` leaves the pin as it is.
    pub fn apply_mode(
        &mut self,
        mode: &OperationMode,
        sink: &mut impl EventSink,
    ) -> Result<(), RelayError> {
        let Some(level) = mode.pin_state() else {
            self.stats.unknown += 1;
            sink.emit(&AppEvent::UnknownMode {
                location: self.source.location().to_path_buf(),
                raw: mode.to_string(),
            });
            return Ok(());
        };

        // Rewritten every tick, even when unchanged.
        self.relay.set(level)?;
        self.stats.applied += 1;

        if self.last_mode.as_ref() != Some(mode) {
            self.stats.mode_changes += 1;
            sink.emit(&AppEvent::ModeChanged {
                from: self.last_mode.take(),
                to: mode.clone(),
            });
            self.last_mode = Some(mode.clone());
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pin_level(&self) -> PinState {
        self.relay.level()
    }

    pub fn last_mode(&self) -> Option<&OperationMode> {
        self.last_mode.as_ref()
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    pub fn is_stopped(&self) -> bool {
        self.relay.is_released()
    }
}
