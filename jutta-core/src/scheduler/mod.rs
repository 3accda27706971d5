//! Sequence scheduler
//!
//! Walks a [`Sequence`](crate::sequence::Sequence) one step at a time on
//! every tick, talking to the machine through a
//! [`Transport`](crate::traits::Transport).

pub mod context;
pub mod executor;

pub use context::{ExecutionContext, FailureReason, RunOutcome, StepFailure};
pub use executor::SequenceExecutor;
