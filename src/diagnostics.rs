//! Logging backend and panic capture.
//!
//! Call sites use the `log` facade.  [`init_logging`] installs a
//! `tracing-subscriber` formatter that writes to a [`DailyLogFile`] and
//! bridges `log` records into it.  [`install_panic_handler`] makes sure a
//! panic ends up in that same file at error level instead of on a console
//! nobody is watching.
//!
//! ## File layout
//!
//! The active log is always the configured path.  At the first write after
//! local midnight it is renamed to `<path>.YYYY-MM-DD` (the day its content
//! started) and a fresh active file is opened.  Only the newest `backups`
//! dated files are kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::DaemonConfig;
use crate::error::{Error, Result};

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Map a `log` level filter onto the subscriber's.
pub fn to_subscriber_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

// ── Daily log file ────────────────────────────────────────────

/// Log file with a fixed active name, rolled over at local midnight.
pub struct DailyLogFile {
    dir: PathBuf,
    name: String,
    backups: usize,
    active: Mutex<ActiveLog>,
}

struct ActiveLog {
    appender: RollingFileAppender,
    /// Local day the active file's content started on.
    opened: NaiveDate,
}

impl DailyLogFile {
    /// Open (appending to) `log_file`, keeping `backups` dated copies.
    ///
    /// An existing file last written on an earlier day is rolled over by
    /// the first write.
    pub fn open(log_file: &Path, backups: usize) -> Result<Self> {
        let name = log_file
            .file_name()
            .ok_or_else(|| Error::Init(format!("{} does not name a file", log_file.display())))?
            .to_string_lossy()
            .into_owned();
        let dir = match log_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let appender = open_active(&dir, &name)
            .map_err(|e| Error::Init(format!("log file {}: {e}", log_file.display())))?;
        let opened = last_modified_day(log_file).unwrap_or_else(|| Local::now().date_naive());

        Ok(Self {
            dir,
            name,
            backups,
            active: Mutex::new(ActiveLog { appender, opened }),
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Roll the active file over if `today` is later than the day it was
    /// started.  Returns `true` if a rollover happened.
    pub fn roll_over(&self, today: NaiveDate) -> io::Result<bool> {
        let mut active = self.lock();
        self.roll_over_locked(&mut active, today)
    }

    /// Dated backups currently on disk, oldest first.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.name);
        let mut dated: Vec<(NaiveDate, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(day) = file_name
                .to_str()
                .and_then(|n| n.strip_prefix(&prefix))
                .and_then(|d| NaiveDate::parse_from_str(d, BACKUP_DATE_FORMAT).ok())
            else {
                continue;
            };
            dated.push((day, entry.path()));
        }
        dated.sort();
        Ok(dated.into_iter().map(|(_, path)| path).collect())
    }

    fn roll_over_locked(&self, active: &mut ActiveLog, today: NaiveDate) -> io::Result<bool> {
        if today <= active.opened {
            return Ok(false);
        }
        let backup = self.dir.join(format!(
            "{}.{}",
            self.name,
            active.opened.format(BACKUP_DATE_FORMAT)
        ));
        // Advance first so a failed rename is not retried on every write.
        active.opened = today;

        match fs::rename(self.active_path(), &backup) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        active.appender =
            open_active(&self.dir, &self.name).map_err(|e| io::Error::other(e.to_string()))?;
        self.prune()?;
        Ok(true)
    }

    fn prune(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let excess = backups.len().saturating_sub(self.backups);
        for stale in &backups[..excess] {
            fs::remove_file(stale)?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ActiveLog> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_active(
    dir: &Path,
    name: &str,
) -> core::result::Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

fn last_modified_day(path: &Path) -> Option<NaiveDate> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).date_naive())
}

/// Per-event writer handed out to the formatter.
pub struct DailyLogWriter<'a> {
    log: &'a DailyLogFile,
}

impl io::Write for DailyLogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut active = self.log.lock();
        // A failed rollover keeps writing to the current file.
        let _ = self
            .log
            .roll_over_locked(&mut active, Local::now().date_naive());
        active.appender.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.lock().appender.flush()
    }
}

impl<'a> MakeWriter<'a> for DailyLogFile {
    type Writer = DailyLogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        DailyLogWriter { log: self }
    }
}

/// Install the global logger.  Call once, before anything else logs.
pub fn init_logging(config: &DaemonConfig) -> Result<()> {
    let level = config.log_level_filter()?;
    let log_file = DailyLogFile::open(&config.log_file, config.log_backups)?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(to_subscriber_level(level))
        .try_init()
        .map_err(|e| Error::Init(format!("logger already installed: {e}")))
}

pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        match info.location() {
            Some(loc) => log::error!("PANIC at {}:{}: {}", loc.file(), loc.line(), reason),
            None => log::error!("PANIC: {}", reason),
        }
    }));
}
