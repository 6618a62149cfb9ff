//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements    | Connects to                    |
//! |----------------|---------------|--------------------------------|
//! | `config_file`  | ConfigPort    | `/etc/thermostat_controllerd.json` |
//! | `gpio`         | OutputPin     | Raspberry Pi GPIO (rppal)      |
//! | `log_sink`     | EventSink     | Rotating log file              |
//! | `mode_file`    | ModeSource    | Shared mode file               |

pub mod config_file;
#[cfg(feature = "rpi")]
pub mod gpio;
pub mod log_sink;
pub mod mode_file;
