//! JUTTA Sequencer Hardware Abstraction Layer
//!
//! This crate defines the serial traits the sequencer needs from a board
//! HAL. Everything here is non-blocking: the sequencer shares one execution
//! context with the rest of the controller, so a transmit or receive call
//! must return immediately with whatever the peripheral can do right now.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  jutta-core (sequence executor)         │
//! └─────────────────────────────────────────┘
//!                     │  Transport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jutta-drivers (LineTransport)          │
//! └─────────────────────────────────────────┘
//!                     │  UartTx / UartRx
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jutta-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          board UART / embedded-io type
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::IoUart`] - Adapter for any `embedded-io` serial port

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{IoUart, Uart, UartConfig, UartRx, UartTx};
