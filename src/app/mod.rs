//! Application core — pure domain logic, zero direct I/O.
//!
//! Mode classification and the poll loop.  All interaction with the file
//! system, GPIO and logging happens through **port traits** defined in
//! [`ports`] (plus `embedded-hal`'s `OutputPin`), keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod mode;
pub mod ports;
pub mod service;
