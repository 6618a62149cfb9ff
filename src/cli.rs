//! Command-line surface: a single optional `--log` override.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, Command};

use crate::config::DEFAULT_LOG_FILE;

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Replaces the configured log file when present.
    pub log_file: Option<PathBuf>,
}

/// Builds and returns the CLI argument parser.
pub fn build_cli() -> Command {
    Command::new("thermostat-controllerd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drives the thermostat relay from the shared operation-mode file")
        .arg(
            Arg::new("log")
                .short('l')
                .long("log")
                .value_name("FILE")
                .help(format!("file to write log to (default '{DEFAULT_LOG_FILE}')"))
                .value_parser(value_parser!(PathBuf))
                .required(false),
        )
}

pub fn parse_from<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(args)?;
    Ok(CliArgs {
        log_file: matches.get_one::<PathBuf>("log").cloned(),
    })
}

/// Parse the process arguments, exiting with usage text on error.
pub fn parse() -> CliArgs {
    parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}
