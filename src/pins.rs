//! GPIO pin assignments for the thermostat controller.
//!
//! Single source of truth for pin numbers.  All numbers use the Broadcom
//! SoC (BCM) scheme, not physical header positions.

/// Digital output to the thermostat relay.
/// HIGH = manual override requested, LOW = thermostat runs its own schedule.
pub const THERMOSTAT_MODE_PIN: u8 = 17;

/// Highest BCM GPIO line broken out on the 40-pin header.
pub const MAX_HEADER_PIN: u8 = 27;
