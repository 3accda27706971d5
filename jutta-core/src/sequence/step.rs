//! Step model
//!
//! A step is either a command sent to the machine or a plain wait. Step
//! fields are private so every step that exists has passed validation:
//! command steps carry a non-zero acknowledgement timeout and raw
//! payloads are already terminated.

use heapless::String;
use jutta_protocol::{strip_terminator, SymbolicCommand};

use super::encoder::{encode_raw, Payload};
use crate::config::{DurationMs, StepConfig, StepError, DEFAULT_ACK_TIMEOUT_MS, MAX_LABEL_LEN};

/// Step label used in logs and failure reports
pub type Label = String<MAX_LABEL_LEN>;

/// Label of delay steps without a description
const DELAY_LABEL: &str = "delay";

/// Copy `text` into a bounded string, dropping whatever does not fit
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// What a command step sends
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandPayload {
    /// Fixed operation from the command table
    Symbolic(SymbolicCommand),
    /// Literal protocol text, terminator included
    Raw(Payload),
}

/// Send one payload and wait for its acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandStep {
    payload: CommandPayload,
    pre_delay_ms: u32,
    ack_timeout_ms: u32,
    label: Label,
}

impl CommandStep {
    /// Step sending a symbolic command, labelled with its action text
    pub fn symbolic(command: SymbolicCommand) -> Self {
        Self {
            payload: CommandPayload::Symbolic(command),
            pre_delay_ms: 0,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            label: truncated(command.action()),
        }
    }

    /// Step sending raw protocol text
    ///
    /// The line terminator is appended unless `text` already ends with it.
    pub fn raw(text: &str) -> Result<Self, StepError> {
        let body = strip_terminator(text);
        if body.is_empty() {
            return Err(StepError::EmptyPayload);
        }
        let payload = encode_raw(text).ok_or(StepError::PayloadTooLong)?;
        Ok(Self {
            payload: CommandPayload::Raw(payload),
            pre_delay_ms: 0,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            label: truncated(body),
        })
    }

    /// Wait this long after the previous step before sending
    pub fn with_pre_delay(mut self, ms: u32) -> Self {
        self.pre_delay_ms = ms;
        self
    }

    /// Fail the step if no acknowledgement arrives within `ms`
    pub fn with_timeout(mut self, ms: u32) -> Result<Self, StepError> {
        if ms == 0 {
            return Err(StepError::ZeroTimeout);
        }
        self.ack_timeout_ms = ms;
        Ok(self)
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = truncated(label);
        self
    }

    pub fn payload(&self) -> &CommandPayload {
        &self.payload
    }

    pub fn pre_delay_ms(&self) -> u32 {
        self.pre_delay_ms
    }

    pub fn ack_timeout_ms(&self) -> u32 {
        self.ack_timeout_ms
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Wait without talking to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayStep {
    wait_ms: u32,
    label: Label,
}

impl DelayStep {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            label: truncated(DELAY_LABEL),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = truncated(label);
        self
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn from_config(config: &StepConfig) -> Result<Self, StepError> {
        let wait = match (config.sleep, config.delay) {
            (Some(_), Some(_)) => return Err(StepError::SleepAndDelay),
            (Some(wait), None) | (None, Some(wait)) => wait,
            (None, None) => return Err(StepError::NoAction),
        };
        if config.timeout.is_some() {
            return Err(StepError::TimeoutOnDelay);
        }

        let step = Self::new(wait.as_ms());
        Ok(match &config.description {
            Some(description) => step.with_label(description),
            None => step,
        })
    }
}

/// One unit of work in a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Command(CommandStep),
    Delay(DelayStep),
}

impl Step {
    /// Validate one step description
    pub fn from_config(config: &StepConfig) -> Result<Self, StepError> {
        let command = match (&config.command, &config.raw) {
            (Some(_), Some(_)) => return Err(StepError::CommandAndRaw),
            (Some(id), None) => {
                let command = SymbolicCommand::from_id(id).ok_or(StepError::UnknownCommand)?;
                CommandStep::symbolic(command)
            }
            (None, Some(raw)) => CommandStep::raw(raw)?,
            (None, None) => return DelayStep::from_config(config).map(Step::Delay),
        };

        if config.sleep.is_some() {
            return Err(StepError::SleepWithCommand);
        }

        let mut command = command.with_pre_delay(config.delay.map_or(0, DurationMs::as_ms));
        if let Some(timeout) = config.timeout {
            command = command.with_timeout(timeout.as_ms())?;
        }
        if let Some(description) = &config.description {
            command = command.with_label(description);
        }
        Ok(Step::Command(command))
    }

    pub fn label(&self) -> &str {
        match self {
            Step::Command(command) => command.label(),
            Step::Delay(delay) => delay.label(),
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Step::Command(_))
    }

    /// Time spent waiting before the step acts (pre-delay or wait)
    pub fn wait_ms(&self) -> u32 {
        match self {
            Step::Command(command) => command.pre_delay_ms(),
            Step::Delay(delay) => delay.wait_ms(),
        }
    }
}

impl From<CommandStep> for Step {
    fn from(step: CommandStep) -> Self {
        Step::Command(step)
    }
}

impl From<DelayStep> for Step {
    fn from(step: DelayStep) -> Self {
        Step::Delay(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_of(step: Step) -> CommandStep {
        match step {
            Step::Command(command) => command,
            Step::Delay(_) => panic!("expected a command step"),
        }
    }

    #[test]
    fn test_symbolic_defaults() {
        let step = CommandStep::symbolic(SymbolicCommand::CoffeePressOn);
        assert_eq!(step.pre_delay_ms(), 0);
        assert_eq!(step.ack_timeout_ms(), DEFAULT_ACK_TIMEOUT_MS);
        assert_eq!(step.label(), "Turning coffee press on");
    }

    #[test]
    fn test_raw_label_strips_terminator() {
        let step = CommandStep::raw("FN:0A\r\n").unwrap();
        assert_eq!(step.label(), "FN:0A");
    }

    #[test]
    fn test_raw_empty_rejected() {
        assert_eq!(CommandStep::raw(""), Err(StepError::EmptyPayload));
        assert_eq!(CommandStep::raw("\r\n"), Err(StepError::EmptyPayload));
    }

    #[test]
    fn test_raw_terminator_must_fit() {
        // 31 bytes of text + 2 byte terminator exceeds the payload buffer
        let text = "FN:0000000000000000000000000000";
        assert_eq!(text.len(), 31);
        assert_eq!(CommandStep::raw(text), Err(StepError::PayloadTooLong));
        assert!(CommandStep::raw(&text[..30]).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let step = CommandStep::symbolic(SymbolicCommand::GrinderOn);
        assert_eq!(step.with_timeout(0), Err(StepError::ZeroTimeout));
    }

    #[test]
    fn test_from_config_command_with_delay_and_timeout() {
        let config = StepConfig::command(SymbolicCommand::GrinderOff)
            .with_delay(250)
            .with_timeout(1000)
            .with_description("stop grinding");
        let command = command_of(Step::from_config(&config).unwrap());
        assert_eq!(command.payload(), &CommandPayload::Symbolic(SymbolicCommand::GrinderOff));
        assert_eq!(command.pre_delay_ms(), 250);
        assert_eq!(command.ack_timeout_ms(), 1000);
        assert_eq!(command.label(), "stop grinding");
    }

    #[test]
    fn test_from_config_accepts_alias() {
        let mut config = StepConfig::default();
        config.command = Some(truncated("brew_group_to_brewing_position"));
        let command = command_of(Step::from_config(&config).unwrap());
        assert_eq!(
            command.payload(),
            &CommandPayload::Symbolic(SymbolicCommand::BrewGroupPosition)
        );
    }

    #[test]
    fn test_from_config_unknown_command() {
        let mut config = StepConfig::default();
        config.command = Some(truncated("espresso_now"));
        assert_eq!(Step::from_config(&config), Err(StepError::UnknownCommand));
    }

    #[test]
    fn test_from_config_contradictions() {
        let both = StepConfig {
            raw: Some(truncated("FN:07")),
            ..StepConfig::command(SymbolicCommand::GrinderOn)
        };
        assert_eq!(Step::from_config(&both), Err(StepError::CommandAndRaw));

        let sleep_on_command = StepConfig {
            sleep: Some(DurationMs(100)),
            ..StepConfig::command(SymbolicCommand::GrinderOn)
        };
        assert_eq!(
            Step::from_config(&sleep_on_command),
            Err(StepError::SleepWithCommand)
        );

        let timeout_on_delay = StepConfig::sleep(100).with_timeout(50);
        assert_eq!(
            Step::from_config(&timeout_on_delay),
            Err(StepError::TimeoutOnDelay)
        );

        let sleep_and_delay = StepConfig::sleep(100).with_delay(50);
        assert_eq!(
            Step::from_config(&sleep_and_delay),
            Err(StepError::SleepAndDelay)
        );

        assert_eq!(
            Step::from_config(&StepConfig::default()),
            Err(StepError::NoAction)
        );
    }

    #[test]
    fn test_delay_only_step() {
        let config = StepConfig::default().with_delay(750);
        let step = Step::from_config(&config).unwrap();
        assert!(!step.is_command());
        assert_eq!(step.wait_ms(), 750);
        assert_eq!(step.label(), "delay");
    }

    #[test]
    fn test_zero_wait_allowed() {
        let step = Step::from_config(&StepConfig::sleep(0)).unwrap();
        assert_eq!(step.wait_ms(), 0);
    }
}
