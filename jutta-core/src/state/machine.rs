//! Phase definition

use super::events::Event;

/// Executor phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No sequence running, last run (if any) succeeded
    #[default]
    Idle,
    /// Waiting out a pre-delay or a delay step
    AwaitingPreDelay,
    /// Offering the current payload to the transport
    Sending,
    /// Payload accepted, waiting for the acknowledgement
    AwaitingAck,
    /// Last run was cancelled
    Aborted,
    /// Last run stopped on a failed step
    Failed,
}

impl Phase {
    /// A run is in progress
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Phase::AwaitingPreDelay | Phase::Sending | Phase::AwaitingAck
        )
    }

    /// No run in progress, a new one may start
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Process an event and return the next phase
    ///
    /// Events that make no sense in the current phase leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Idle | Aborted | Failed, Start) => AwaitingPreDelay,

            (AwaitingPreDelay, DelayElapsed) => Sending,
            (Sending, SendAccepted) => AwaitingAck,

            // Delay steps complete straight out of AwaitingPreDelay
            (AwaitingPreDelay | AwaitingAck, StepDone) => AwaitingPreDelay,
            (AwaitingPreDelay | AwaitingAck, SequenceDone) => Idle,

            (Sending | AwaitingAck, StepFailed) => Failed,

            (AwaitingPreDelay | Sending | AwaitingAck, Cancel) => Aborted,

            _ => self,
        }
    }
}
