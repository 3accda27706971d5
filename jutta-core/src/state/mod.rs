//! Executor state machine
//!
//! The phase of a sequence run is explicit, finite and deterministic. The
//! executor only ever moves between phases through [`Phase::transition`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
