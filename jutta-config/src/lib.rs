//! Sequence configuration files
//!
//! Host-side tooling for JUTTA sequences:
//!
//! - TOML sequence files (`[[sequence]]` tables) parsed with serde
//! - Versioned postcard images of the same data for storing on a device
//! - Validation into core [`Sequence`](jutta_core::sequence::Sequence)s
//! - The `jutta-check` validator ([`check`])
//!
//! ```toml
//! [[sequence]]
//! name = "grind"
//! steps = [
//!     { command = "grinder_on" },
//!     { sleep = "3600ms" },
//!     { command = "grinder_off", timeout = "2s" },
//! ]
//! ```

pub mod binary;
pub mod check;
pub mod error;
pub mod file;

pub use binary::{from_bytes, to_bytes, BINARY_VERSION};
pub use error::{BinaryError, TomlError, ValidationError};
pub use file::{SequenceConfig, SequenceFile};
