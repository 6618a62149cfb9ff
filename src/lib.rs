//! Thermostat controller daemon library.
//!
//! Exposes the control loop and its adapters for integration testing.
//! The Raspberry Pi GPIO adapter is only built with the `rpi` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod shutdown;
