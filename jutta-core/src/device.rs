//! Device actions
//!
//! [`JuttaDevice`] is what the rest of the firmware talks to. It owns the
//! transport and the executor, accepts one sequence at a time and turns
//! every other request into an explicit error.

use core::fmt;

use crate::scheduler::{RunOutcome, SequenceExecutor};
use crate::sequence::{Sequence, Step};
use crate::state::Phase;
use crate::traits::Transport;

/// Errors returned by device actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// A sequence is already running
    Busy,
    /// Submitted sequence has no steps
    EmptySequence,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Busy => f.write_str("coffee maker busy"),
            DeviceError::EmptySequence => f.write_str("sequence has no steps"),
        }
    }
}

/// A JUTTA machine behind a transport
pub struct JuttaDevice<T: Transport> {
    transport: T,
    executor: SequenceExecutor,
}

impl<T: Transport> JuttaDevice<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            executor: SequenceExecutor::new(),
        }
    }

    /// Submit a sequence
    ///
    /// Fails with [`DeviceError::Busy`] while another sequence runs. The
    /// running sequence is not affected.
    pub fn run_sequence(&mut self, sequence: Sequence) -> Result<(), DeviceError> {
        if self.executor.is_active() {
            warn!("Coffee maker busy - cannot run sequence");
            return Err(DeviceError::Busy);
        }
        self.executor.start(sequence)
    }

    /// Cancel the running sequence
    ///
    /// Takes effect on the next tick. Commands already sent are not undone.
    /// Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        self.executor.cancel()
    }

    /// Advance the running sequence
    ///
    /// Call periodically with a monotonic millisecond timestamp. Returns the
    /// outcome on the tick a run ends.
    pub fn tick(&mut self, now_ms: u32) -> Option<RunOutcome> {
        self.executor.tick(now_ms, &mut self.transport)
    }

    pub fn is_busy(&self) -> bool {
        self.executor.is_active()
    }

    pub fn phase(&self) -> Phase {
        self.executor.phase()
    }

    /// Outcome of the most recent run (`Pending` while one is active)
    pub fn last_outcome(&self) -> &RunOutcome {
        self.executor.outcome()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.executor.current_step()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepConfig;
    use crate::scheduler::FailureReason;
    use crate::traits::mock::{AckScript, MockTransport};
    use jutta_protocol::SymbolicCommand;

    fn make_device() -> JuttaDevice<MockTransport> {
        JuttaDevice::new(MockTransport::acking())
    }

    fn make_sequence() -> Sequence {
        Sequence::from_config(&[
            StepConfig::command(SymbolicCommand::BrewGroupPosition),
            StepConfig::sleep(200),
            StepConfig::command(SymbolicCommand::BrewGroupReset),
        ])
        .unwrap()
    }

    #[test]
    fn test_run_to_completion() {
        let mut device = make_device();
        device.run_sequence(make_sequence()).unwrap();
        assert!(device.is_busy());
        assert_eq!(device.last_outcome(), &RunOutcome::Pending);

        assert_eq!(device.tick(0), None);
        assert_eq!(device.tick(200), Some(RunOutcome::Succeeded));
        assert!(!device.is_busy());
        assert_eq!(device.phase(), Phase::Idle);
        assert_eq!(device.last_outcome(), &RunOutcome::Succeeded);
        assert_eq!(device.transport().sent.len(), 2);
    }

    #[test]
    fn test_second_run_rejected_while_busy() {
        let mut device = make_device();
        device.run_sequence(make_sequence()).unwrap();
        device.tick(0);

        let other = Sequence::from_config(&[StepConfig::command(SymbolicCommand::WaterPumpOn)])
            .unwrap();
        assert_eq!(device.run_sequence(other), Err(DeviceError::Busy));

        // The first run carries on untouched
        assert_eq!(device.tick(200), Some(RunOutcome::Succeeded));
        assert_eq!(&device.transport().sent[1][..], b"FN:0D\r\n");
    }

    #[test]
    fn test_accepts_new_run_after_completion() {
        let mut device = make_device();
        device.run_sequence(make_sequence()).unwrap();
        device.tick(0);
        device.tick(200);
        assert!(device.run_sequence(make_sequence()).is_ok());
    }

    #[test]
    fn test_cancel_then_rerun() {
        let mut device = make_device();
        device.run_sequence(make_sequence()).unwrap();
        device.tick(0);
        assert!(device.cancel());
        assert_eq!(device.tick(10), Some(RunOutcome::Cancelled { index: 1 }));
        assert_eq!(device.phase(), Phase::Aborted);
        assert!(!device.cancel());

        device.run_sequence(make_sequence()).unwrap();
        assert_eq!(device.tick(20), None);
        assert_eq!(device.current_step().map(|s| s.label()), Some("delay"));
    }

    #[test]
    fn test_failure_reported_with_step() {
        let mut device = JuttaDevice::new(MockTransport::new(AckScript::Silent));
        device.run_sequence(make_sequence()).unwrap();
        device.tick(0);
        let outcome = device.tick(5000).unwrap();

        match outcome {
            RunOutcome::Failed(failure) => {
                assert_eq!(failure.index, 0);
                assert_eq!(failure.label.as_str(), "Moving brew group");
                assert_eq!(failure.reason, FailureReason::Timeout);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(device.phase(), Phase::Failed);
        assert!(!device.is_busy());
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let mut device = make_device();
        assert_eq!(
            device.run_sequence(Sequence::new()),
            Err(DeviceError::EmptySequence)
        );
        assert!(!device.is_busy());
    }

    #[test]
    fn test_device_over_borrowed_transport() {
        let mut transport = MockTransport::acking();
        {
            let mut device = JuttaDevice::new(&mut transport);
            device
                .run_sequence(
                    Sequence::from_config(&[StepConfig::command(SymbolicCommand::GrinderOn)])
                        .unwrap(),
                )
                .unwrap();
            assert_eq!(device.tick(0), Some(RunOutcome::Succeeded));
        }
        assert_eq!(transport.sent.len(), 1);
    }
}
