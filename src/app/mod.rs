//! Application core — pure domain logic, zero I/O.
//!
//! This module wires the alarm FSM, the remote debouncer and the display
//! dispatcher into one owned controller.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
