//! Configuration types
//!
//! Step descriptions as they come out of the configuration file (TOML on
//! the host, postcard binary on the device) and the errors raised while
//! turning them into a [`Sequence`](crate::sequence::Sequence).

pub mod duration;
pub mod error;
pub mod types;

pub use duration::*;
pub use error::*;
pub use types::*;
