//! Daemon configuration parameters
//!
//! Everything tunable about the controller lives here.  Values come from
//! the optional JSON config file (see [`crate::adapters::config_file`]),
//! with the `--log` command-line flag applied on top.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::error::Result as DaemonResult;
use crate::pins;

/// Where the config file is looked up.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/thermostat_controllerd.json";
/// Mode file written by the web front end.
pub const DEFAULT_MODE_FILE: &str = "/var/www/thermostat_operation_mode";
pub const DEFAULT_LOG_FILE: &str = "/var/log/thermostat_controllerd.log";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Core daemon configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    // --- Mode source ---
    /// Absolute path of the mode file
    pub mode_file: PathBuf,
    /// Seconds between mode file reads
    pub poll_interval_secs: u64,

    // --- Relay ---
    /// BCM number of the relay output
    pub relay_pin: u8,

    // --- Logging ---
    /// Active log file; rotated copies are placed alongside it
    pub log_file: PathBuf,
    /// Minimum level written to the log (`error`, `warn`, `info`, ...)
    pub log_level: String,
    /// Rotated log files kept in addition to the active one
    pub log_backups: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            mode_file: PathBuf::from(DEFAULT_MODE_FILE),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,

            relay_pin: pins::THERMOSTAT_MODE_PIN,

            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: String::from("warn"),
            log_backups: 3,
        }
    }
}

impl DaemonConfig {
    /// Load from `port`, apply a `--log` override, and validate the result.
    pub fn resolve(port: &impl ConfigPort, log_override: Option<PathBuf>) -> DaemonResult<Self> {
        let mut config = port.load()?;
        if let Some(log_file) = log_override {
            config.log_file = log_file;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::ValidationFailed("log_level is not a known level"))
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_secs must be at least 1",
            ));
        }
        if self.relay_pin > pins::MAX_HEADER_PIN {
            return Err(ConfigError::ValidationFailed(
                "relay_pin is not a header GPIO line",
            ));
        }
        if !self.mode_file.is_absolute() {
            return Err(ConfigError::ValidationFailed(
                "mode_file must be an absolute path",
            ));
        }
        if self.log_file.file_name().is_none() {
            return Err(ConfigError::ValidationFailed("log_file must name a file"));
        }
        if self.log_backups == 0 {
            return Err(ConfigError::ValidationFailed(
                "log_backups must keep at least one file",
            ));
        }
        self.log_level_filter()?;
        Ok(())
    }
}
