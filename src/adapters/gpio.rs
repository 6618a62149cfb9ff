//! Raspberry Pi GPIO adapter.
//!
//! Hands out the relay line as an `rppal` output pin, which implements
//! [`embedded_hal::digital::OutputPin`] through rppal's `hal` feature.
//! The pin is configured with reset-on-drop, so once the
//! [`RelayDriver`](crate::drivers::relay::RelayDriver) lets go of it the
//! line is returned to the mode it had before the daemon started.

use log::info;
use rppal::gpio::{Gpio, OutputPin};

use crate::error::Error;

/// Claim BCM line `bcm_pin` as an output, initially LOW.
pub fn acquire_output(bcm_pin: u8) -> Result<OutputPin, Error> {
    let gpio = Gpio::new().map_err(|e| Error::Init(format!("GPIO unavailable: {e}")))?;
    let pin = gpio
        .get(bcm_pin)
        .map_err(|e| Error::Init(format!("GPIO{bcm_pin} unavailable: {e}")))?;

    let mut out = pin.into_output_low();
    out.set_reset_on_drop(true);
    info!("gpio: GPIO{} claimed as output (LOW)", bcm_pin);
    Ok(out)
}
