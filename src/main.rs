//! thermostat-controllerd — Main Entry Point
//!
//! Hexagonal layout, single control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  ModeFile        rppal OutputPin    LogEventSink           │
//! │  (ModeSource)    (OutputPin)        (EventSink)            │
//! │  JsonConfigFile  ShutdownSignal                            │
//! │  (ConfigPort)    (SIGTERM/SIGINT)                          │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │        ModePoller (read · apply · park)          │      │
//! │  │        RelayDriver (exclusive pin owner)         │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info};

use thermostat_controllerd::adapters::config_file::JsonConfigFile;
use thermostat_controllerd::adapters::gpio;
use thermostat_controllerd::adapters::log_sink::LogEventSink;
use thermostat_controllerd::adapters::mode_file::ModeFile;
use thermostat_controllerd::app::service::ModePoller;
use thermostat_controllerd::config::{DEFAULT_CONFIG_FILE, DaemonConfig};
use thermostat_controllerd::shutdown::ShutdownSignal;
use thermostat_controllerd::{cli, diagnostics};

fn main() -> Result<()> {
    // ── 1. Arguments + config ─────────────────────────────────
    let args = cli::parse();
    let config = DaemonConfig::resolve(&JsonConfigFile::new(DEFAULT_CONFIG_FILE), args.log_file)
        .context("loading configuration")?;

    // ── 2. Logging ────────────────────────────────────────────
    diagnostics::init_logging(&config).context("initialising logging")?;
    diagnostics::install_panic_handler();

    info!("thermostat-controllerd v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "mode file {} | relay GPIO{} | interval {}s",
        config.mode_file.display(),
        config.relay_pin,
        config.poll_interval_secs
    );

    // ── 3. Relay pin (fatal on failure) ───────────────────────
    let pin = gpio::acquire_output(config.relay_pin).inspect_err(|e| {
        error!("GPIO init failed: {}, exiting", e);
    })?;

    let mut sink = LogEventSink::new();
    let mut poller = ModePoller::new(
        ModeFile::new(&config.mode_file),
        pin,
        config.poll_interval(),
    )
    .inspect_err(|e| error!("relay init failed: {}, exiting", e))?;

    // ── 4. Signals ────────────────────────────────────────────
    // On failure `poller` drops here, which parks and releases the relay.
    let mut shutdown = ShutdownSignal::install_os_handlers()?;

    // ── 5. Poll loop ──────────────────────────────────────────
    poller.start(&mut sink);
    poller.run(&mut shutdown, &mut sink);

    info!("Caught termination signal. GPIO released, exiting");
    Ok(())
}
