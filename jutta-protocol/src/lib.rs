//! JUTTA service-port protocol
//!
//! This crate defines the text commands understood by JUTTA coffee machines
//! on their service UART and the line discipline around them. Commands are
//! short ASCII strings terminated by CR LF; the machine answers each
//! accepted command with `ok:`.
//!
//! # Protocol Overview
//!
//! ```text
//! controller ── "FN:07\r\n" ──▶ machine      (grinder on)
//! controller ◀── "ok:\r\n" ─── machine      (acknowledged)
//! ```
//!
//! The 4-byte bit obfuscation applied on the wire lives below this crate,
//! in the UART driver.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod line;
pub mod response;

pub use commands::{SymbolicCommand, COMMAND_TABLE, JUTTA_GET_TYPE};
pub use line::{ensure_terminated, is_terminated, strip_terminator, LINE_TERMINATOR};
pub use response::{LineError, LineParser, Response, ACK_LINE, MAX_LINE_LEN};
