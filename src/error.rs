//! Unified error types for the thermostat controller daemon.
//!
//! A single `Error` enum that every startup step converts into, so the
//! binary edge can hand it straight to `anyhow`.  A mode file that cannot be
//! read never reaches it: the poll loop reports [`ReadError`] and retries.

use core::fmt;
use std::io;
use std::path::{Path, PathBuf};

use embedded_hal::digital::ErrorKind;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level daemon error
// ---------------------------------------------------------------------------

/// Every fallible startup operation funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The relay output could not be driven.
    Relay(RelayError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// Peripheral or logging initialisation failed.
    Init(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay(e) => write!(f, "relay: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Relay(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Init(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode file read errors
// ---------------------------------------------------------------------------

/// The mode file was missing, unreadable, or not valid text.
///
/// Always transient from the poller's point of view: the next tick retries.
#[derive(Debug)]
pub struct ReadError {
    path: PathBuf,
    source: io::Error,
}

impl ReadError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not read operation mode from {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Relay errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayError {
    /// The underlying GPIO write failed.
    Write(ErrorKind),
    /// The pin has already been parked and handed back to the OS.
    Released,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(kind) => write!(f, "GPIO write failed ({kind})"),
            Self::Released => write!(f, "relay pin already released"),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<RelayError> for Error {
    fn from(e: RelayError) -> Self {
        Self::Relay(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Daemon-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
