//! Mode-file adapter.
//!
//! Implements [`ModeSource`] by re-opening the shared state file on every
//! read, so edits by the web front end (including delete-and-recreate) are
//! picked up on the next tick.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::app::mode::OperationMode;
use crate::app::ports::ModeSource;
use crate::error::ReadError;

pub struct ModeFile {
    path: PathBuf,
}

impl ModeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ModeSource for ModeFile {
    fn read_mode(&mut self) -> Result<OperationMode, ReadError> {
        let file = File::open(&self.path).map_err(|e| ReadError::new(&self.path, e))?;
        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|e| ReadError::new(&self.path, e))?;
        Ok(OperationMode::parse(&line))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
