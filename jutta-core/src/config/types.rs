//! Configuration type definitions

use heapless::String;
use jutta_protocol::SymbolicCommand;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{DurationMs, StepError};
use crate::sequence::truncated;

/// Maximum steps per sequence
pub const MAX_STEPS: usize = 32;

/// Maximum encoded payload length, terminator included
pub const MAX_PAYLOAD_LEN: usize = 32;

/// Maximum step label length
pub const MAX_LABEL_LEN: usize = 32;

/// Maximum symbolic command identifier length
pub const MAX_COMMAND_ID_LEN: usize = 32;

/// Acknowledgement timeout used when a command step does not set one
pub const DEFAULT_ACK_TIMEOUT_MS: u32 = 5000;

/// One step as written in the configuration
///
/// Exactly one of `command`, `raw` or `sleep` selects the step kind.
/// A step with only `delay` is also a delay step. On command steps
/// `delay` is the pre-delay before the payload is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StepConfig {
    /// Symbolic command identifier (e.g. `grinder_on`)
    pub command: Option<String<MAX_COMMAND_ID_LEN>>,
    /// Raw protocol text, terminator optional
    pub raw: Option<String<MAX_PAYLOAD_LEN>>,
    /// Pure wait
    pub sleep: Option<DurationMs>,
    /// Pre-delay on command steps, wait on delay steps
    pub delay: Option<DurationMs>,
    /// Acknowledgement timeout (command steps only)
    pub timeout: Option<DurationMs>,
    /// Label used in logs and failure reports
    pub description: Option<String<MAX_LABEL_LEN>>,
}

impl StepConfig {
    /// Symbolic command step
    pub fn command(command: SymbolicCommand) -> Self {
        Self {
            command: Some(truncated(command.id())),
            ..Self::default()
        }
    }

    /// Raw command step
    pub fn raw(text: &str) -> Result<Self, StepError> {
        let mut raw = String::new();
        raw.push_str(text).map_err(|_| StepError::PayloadTooLong)?;
        Ok(Self {
            raw: Some(raw),
            ..Self::default()
        })
    }

    /// Delay step
    pub fn sleep(ms: u32) -> Self {
        Self {
            sleep: Some(DurationMs(ms)),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, ms: u32) -> Self {
        self.delay = Some(DurationMs(ms));
        self
    }

    pub fn with_timeout(mut self, ms: u32) -> Self {
        self.timeout = Some(DurationMs(ms));
        self
    }

    /// Set the label, cut to [`MAX_LABEL_LEN`] bytes
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(truncated(description));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder_uses_table_id() {
        let step = StepConfig::command(SymbolicCommand::WaterPumpOn);
        assert_eq!(step.command.as_deref(), Some("water_pump_on"));
        assert!(step.raw.is_none());
    }

    #[test]
    fn test_raw_builder_rejects_overlong_text() {
        let long = "FN:0123456789012345678901234567890123";
        assert_eq!(StepConfig::raw(long), Err(StepError::PayloadTooLong));
    }

    #[test]
    fn test_description_truncated() {
        let step = StepConfig::sleep(10)
            .with_description("a description that is far longer than thirty-two bytes");
        assert_eq!(step.description.map(|d| d.len()), Some(MAX_LABEL_LEN));
    }
}
