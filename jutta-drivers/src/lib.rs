//! Driver implementations
//!
//! Concrete implementations of the traits defined in jutta-core:
//!
//! - Line transport (service-port UART, CR LF framing, `ok:` acknowledgements)

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod transport;

pub use transport::{LineTransport, LinkError};
