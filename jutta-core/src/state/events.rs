//! Events that trigger phase transitions

/// Events raised by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A sequence was submitted
    Start,
    /// Pre-delay of a command step is over
    DelayElapsed,
    /// Transport took the payload
    SendAccepted,
    /// Current step finished and another one follows
    StepDone,
    /// Last step finished
    SequenceDone,
    /// Current step timed out or was rejected
    StepFailed,
    /// Cancellation observed
    Cancel,
}
