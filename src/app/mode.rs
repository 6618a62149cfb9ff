//! Operation mode parsed from the mode file.

use core::fmt;

use embedded_hal::digital::PinState;

/// Desired thermostat operating mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationMode {
    /// Thermostat follows its own schedule; relay deasserted.
    Auto,
    /// Manual override; relay asserted.
    Manual,
    /// Anything else, carrying the offending text (trailing whitespace removed).
    Unknown(String),
}

impl OperationMode {
    /// Classify a single line.  Only trailing whitespace is stripped and the
    /// match is case-sensitive, so `"AUTO"` and `" auto"` are `Unknown`.
    pub fn parse(line: &str) -> Self {
        match line.trim_end() {
            "auto" => Self::Auto,
            "manual" => Self::Manual,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Classify the first line of a whole file's contents.
    pub fn from_contents(contents: &str) -> Self {
        Self::parse(contents.split('\n').next().unwrap_or_default())
    }

    /// Relay level this mode calls for, or `None` if the pin must not move.
    pub fn pin_state(&self) -> Option<PinState> {
        match self {
            Self::Auto => Some(PinState::Low),
            Self::Manual => Some(PinState::High),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}
