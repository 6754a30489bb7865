//! HomeGuard alarm controller library.
//!
//! Exposes the pure-logic modules (FSM, credentials, debounce, display
//! dispatch) together with the port traits and host adapters, so the
//! simulator binary and the integration tests drive exactly the same core.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod display;
pub mod fsm;
pub mod input;

mod error;

pub use error::{Error, Result, ScriptError};
