//! Configuration errors

use core::fmt;

/// Problem with a single step description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepError {
    /// Neither a command, raw text nor a wait was given
    NoAction,
    /// Both `command` and `raw` were given
    CommandAndRaw,
    /// Symbolic identifier not in the command table
    UnknownCommand,
    /// Raw text is empty
    EmptyPayload,
    /// Encoded payload does not fit the payload buffer
    PayloadTooLong,
    /// `sleep` on a command step
    SleepWithCommand,
    /// Both `sleep` and `delay` on a delay step
    SleepAndDelay,
    /// `timeout` on a delay step
    TimeoutOnDelay,
    /// Acknowledgement timeout of zero
    ZeroTimeout,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StepError::NoAction => "step has no command, raw text or sleep",
            StepError::CommandAndRaw => "step has both command and raw",
            StepError::UnknownCommand => "unknown command",
            StepError::EmptyPayload => "raw text is empty",
            StepError::PayloadTooLong => "payload too long",
            StepError::SleepWithCommand => "sleep is not allowed on a command step (use delay)",
            StepError::SleepAndDelay => "delay step has both sleep and delay",
            StepError::TimeoutOnDelay => "timeout is only allowed on command steps",
            StepError::ZeroTimeout => "timeout must be greater than zero",
        };
        f.write_str(text)
    }
}

/// Problem with a sequence description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sequence has no steps
    EmptySequence,
    /// Sequence has more than [`MAX_STEPS`](super::MAX_STEPS) steps
    TooManySteps,
    /// Step at `index` is invalid
    InvalidStep { index: usize, error: StepError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySequence => f.write_str("sequence has no steps"),
            ConfigError::TooManySteps => {
                write!(f, "sequence has more than {} steps", super::MAX_STEPS)
            }
            ConfigError::InvalidStep { index, error } => write!(f, "step {}: {}", index, error),
        }
    }
}
