//! Sequences of machine steps
//!
//! A [`Sequence`] is an ordered, non-empty list of [`Step`]s. It is built
//! once from configuration and handed to the executor by value, so it
//! cannot change while it runs.

pub mod encoder;
pub mod step;

pub use encoder::{encode, encode_raw, Payload};
pub use step::{truncated, CommandPayload, CommandStep, DelayStep, Label, Step};

use heapless::Vec;

use crate::config::{ConfigError, StepConfig, MAX_STEPS};

/// Ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence {
    steps: Vec<Step, MAX_STEPS>,
}

impl Sequence {
    /// Create an empty sequence
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Build and validate a sequence from step descriptions
    pub fn from_config(steps: &[StepConfig]) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if steps.len() > MAX_STEPS {
            return Err(ConfigError::TooManySteps);
        }

        let mut sequence = Self::new();
        for (index, config) in steps.iter().enumerate() {
            let step =
                Step::from_config(config).map_err(|error| ConfigError::InvalidStep { index, error })?;
            sequence.push(step)?;
        }
        Ok(sequence)
    }

    /// Append a step
    pub fn push(&mut self, step: Step) -> Result<(), ConfigError> {
        self.steps.push(step).map_err(|_| ConfigError::TooManySteps)
    }

    /// Append a step, builder style
    pub fn then(mut self, step: impl Into<Step>) -> Result<Self, ConfigError> {
        self.push(step.into())?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Lower bound on the run time: the sum of all waits
    pub fn min_duration_ms(&self) -> u32 {
        self.steps
            .iter()
            .fold(0u32, |acc, step| acc.saturating_add(step.wait_ms()))
    }
}
