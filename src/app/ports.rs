//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ModePoller (domain)
//! ```
//!
//! The relay output itself is not a port of ours: the domain consumes any
//! [`embedded_hal::digital::OutputPin`], so real GPIO and test doubles plug
//! in the same way.

use std::path::Path;

use crate::config::DaemonConfig;
use crate::error::ReadError;

use super::events::AppEvent;
use super::mode::OperationMode;

// ───────────────────────────────────────────────────────────────
// Mode source port (driven adapter: shared state file → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: where the desired operating mode comes from.
pub trait ModeSource {
    /// Read and classify the current mode.  Unreadable sources return
    /// [`ReadError`]; unrecognised content is `Ok(OperationMode::Unknown)`.
    fn read_mode(&mut self) -> Result<OperationMode, ReadError>;

    /// Location reported in log messages.
    fn location(&self) -> &Path;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads daemon configuration.
///
/// Implementations return [`DaemonConfig::default()`] when nothing is
/// stored and MUST run [`DaemonConfig::validate`] before handing a
/// stored config back.
pub trait ConfigPort {
    fn load(&self) -> Result<DaemonConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config could not be deserialized.
    Corrupted(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// The config file exists but could not be read.
    IoError(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
