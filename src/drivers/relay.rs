//! Thermostat relay driver.
//!
//! Owns the single digital output that tells the thermostat whether a
//! manual override is requested (HIGH) or it should run on its own (LOW).
//!
//! ## Safety contract
//!
//! - The pin is driven LOW as soon as the driver takes it.
//! - [`RelayDriver::release`] drives it LOW once more and drops the handle.
//!   `Drop` calls `release`, so every exit path parks the relay, and the
//!   pin is parked exactly once no matter how many paths race to do it.
//!
//! ## Dual-target design
//!
//! Generic over [`OutputPin`]: `rppal` GPIO on the Pi, recording mocks in
//! tests.

use embedded_hal::digital::{Error as _, OutputPin, PinState};
use log::{debug, info};

use crate::error::RelayError;

pub struct RelayDriver<P: OutputPin> {
    pin: Option<P>,
    level: PinState,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take exclusive ownership of `pin` and drive it to the safe level.
    pub fn new(pin: P) -> Result<Self, RelayError> {
        let mut relay = Self {
            pin: Some(pin),
            level: PinState::Low,
        };
        relay.set(PinState::Low)?;
        Ok(relay)
    }

    pub fn set(&mut self, level: PinState) -> Result<(), RelayError> {
        let pin = self.pin.as_mut().ok_or(RelayError::Released)?;
        pin.set_state(level)
            .map_err(|e| RelayError::Write(e.kind()))?;
        if self.level != level {
            debug!("relay: {:?} -> {:?}", self.level, level);
        }
        self.level = level;
        Ok(())
    }

    /// Park the relay LOW and give the pin back.
    ///
    /// Returns `true` only for the call that actually released the pin.
    /// The handle is dropped even if the final write fails.
    pub fn release(&mut self) -> bool {
        let Some(mut pin) = self.pin.take() else {
            return false;
        };
        if let Err(e) = pin.set_low() {
            log::error!("relay: park write failed ({:?}), releasing anyway", e.kind());
        }
        self.level = PinState::Low;
        info!("relay: parked LOW and released");
        true
    }

    /// Last level successfully written.
    pub fn level(&self) -> PinState {
        self.level
    }

    pub fn is_released(&self) -> bool {
        self.pin.is_none()
    }
}

impl<P: OutputPin> Drop for RelayDriver<P> {
    fn drop(&mut self) {
        self.release();
    }
}
