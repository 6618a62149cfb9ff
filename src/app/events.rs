//! Outbound application events.
//!
//! The [`ModePoller`](super::service::ModePoller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The production adapter
//! writes them to the rotating log file.

use std::path::PathBuf;
use std::time::Duration;

use embedded_hal::digital::PinState;

use crate::error::RelayError;

use super::mode::OperationMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The poller took over the relay (carries its initial level).
    Started {
        pin: PinState,
        interval: Duration,
    },

    /// A poll cycle is starting.
    Polling,

    /// The mode file was read and classified.
    ModeRead {
        location: PathBuf,
        mode: OperationMode,
    },

    /// The applied mode differs from the previously applied one.
    ModeChanged {
        from: Option<OperationMode>,
        to: OperationMode,
    },

    /// The mode file held something other than `auto` / `manual`.
    UnknownMode { location: PathBuf, raw: String },

    /// The mode file could not be read; the relay was left alone.
    ReadFailed { location: PathBuf, reason: String },

    /// Writing the relay level failed.
    RelayFault(RelayError),

    /// The relay was parked and released.
    Stopped(PollStats),
}

/// Running counters kept by the poller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls: u64,
    pub applied: u64,
    pub mode_changes: u64,
    pub unknown: u64,
    pub read_failures: u64,
    pub relay_faults: u64,
}
