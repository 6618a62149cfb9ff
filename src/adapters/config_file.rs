//! JSON config-file adapter.
//!
//! Implements [`ConfigPort`] on top of an optional file.  A missing file
//! means "run with defaults"; anything present must parse and validate.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::DaemonConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<DaemonConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("config: {} not found, using defaults", self.path.display());
                return Ok(DaemonConfig::default());
            }
            Err(e) => return Err(ConfigError::IoError(e.to_string())),
        };

        let config: DaemonConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        config.validate()?;
        info!("config: loaded {}", self.path.display());
        Ok(config)
    }
}
