//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the
//! `log` facade, which [`crate::diagnostics::init_logging`] routes to the
//! rotating log file.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { pin, interval } => {
                info!(
                    "START | relay={:?} | polling every {}s",
                    pin,
                    interval.as_secs()
                );
            }
            AppEvent::Polling => {
                debug!("Updating operation mode...");
            }
            AppEvent::ModeRead { location, mode } => {
                debug!(
                    "Reading operation mode in {}: {}",
                    location.display(),
                    mode
                );
            }
            AppEvent::ModeChanged { from, to } => match from {
                Some(from) => info!("MODE | {} -> {}", from, to),
                None => info!("MODE | {} (first read)", to),
            },
            AppEvent::UnknownMode { location, raw } => {
                warn!("Unknown operation mode {} in {}", raw, location.display());
            }
            AppEvent::ReadFailed { location, reason } => {
                warn!(
                    "Could not read operation mode from {} ({})",
                    location.display(),
                    reason
                );
            }
            AppEvent::RelayFault(e) => {
                error!("RELAY | {}", e);
            }
            AppEvent::Stopped(s) => {
                info!(
                    "STOP | polls={} applied={} changes={} unknown={} read_failures={} relay_faults={}",
                    s.polls, s.applied, s.mode_changes, s.unknown, s.read_failures, s.relay_faults,
                );
            }
        }
    }
}
