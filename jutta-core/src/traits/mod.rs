//! Hardware abstraction traits
//!
//! The sequencer only ever talks to the machine through [`Transport`].
//! The serial driver in `jutta-drivers` implements it on top of a UART;
//! tests use a scripted in-memory implementation.

pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use transport::{AckStatus, SendStatus, Transport};
