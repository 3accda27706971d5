//! Board-agnostic core of the JUTTA command sequencer
//!
//! This crate contains everything between "a list of steps from the
//! configuration" and "bytes handed to the serial driver":
//!
//! - Step configuration types and validation
//! - Step model (command steps, delay steps) and sequences
//! - Command encoder (symbolic table lookup, raw normalization)
//! - Tick-driven sequence executor with fail-fast timeouts
//! - Device actions (`run_sequence`, `cancel`)
//! - Transport trait implemented by the serial driver
//!
//! Nothing here blocks. Every wait is expressed as "not yet elapsed,
//! check again next tick", driven by the millisecond timestamp passed to
//! [`device::JuttaDevice::tick`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod device;
pub mod scheduler;
pub mod sequence;
pub mod state;
pub mod time;
pub mod traits;

pub use device::{DeviceError, JuttaDevice};
pub use jutta_protocol::SymbolicCommand;
