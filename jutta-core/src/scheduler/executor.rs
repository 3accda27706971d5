//! Sequence executor
//!
//! Runs one sequence at a time, strictly in declared order. Each call to
//! [`SequenceExecutor::tick`] looks at the current step, compares the
//! clock against its timers and advances as far as it can without
//! waiting. Any number of instantaneous transitions (zero delays,
//! immediate acknowledgements) happen within a single tick.
//!
//! A step that times out or is rejected fails the whole run. Nothing is
//! retried and nothing already sent is undone.

use super::context::{ExecutionContext, FailureReason, RunOutcome, StepFailure};
use crate::device::DeviceError;
use crate::sequence::{encode, truncated, Sequence, Step};
use crate::state::{Event, Phase};
use crate::time::{elapsed_ms, has_elapsed};
use crate::traits::{AckStatus, SendStatus, Transport};

/// Result of driving the current step once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepProgress {
    /// Nothing more to do this tick
    Waiting,
    /// Phase moved on, keep going in this tick
    Continue,
    /// Current step finished
    Completed,
    Failed(FailureReason),
}

/// Tick-driven sequence executor
pub struct SequenceExecutor {
    phase: Phase,
    sequence: Option<Sequence>,
    context: ExecutionContext,
    cancel_requested: bool,
}

impl Default for SequenceExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceExecutor {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            sequence: None,
            context: ExecutionContext::default(),
            cancel_requested: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Outcome of the current or most recent run
    pub fn outcome(&self) -> &RunOutcome {
        &self.context.outcome
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Step the run is currently on
    pub fn current_step(&self) -> Option<&Step> {
        self.sequence.as_ref()?.get(self.context.step_index)
    }

    /// Start running `sequence`
    ///
    /// Timers are armed by the first tick after this call.
    pub fn start(&mut self, sequence: Sequence) -> Result<(), DeviceError> {
        if self.phase.is_active() {
            return Err(DeviceError::Busy);
        }
        if sequence.is_empty() {
            return Err(DeviceError::EmptySequence);
        }

        info!("Sequence start: {} steps", sequence.len());
        self.context = ExecutionContext::for_run(sequence.len());
        self.sequence = Some(sequence);
        self.cancel_requested = false;
        self.apply(Event::Start);
        Ok(())
    }

    /// Request cancellation of the active run
    ///
    /// Takes effect on the next tick. Returns `false` if nothing is running.
    pub fn cancel(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        debug!("Cancel requested at step {}", self.context.step_index);
        self.cancel_requested = true;
        true
    }

    /// Advance the active run
    ///
    /// Returns the outcome on the tick the run ends, `None` otherwise.
    pub fn tick<T: Transport>(&mut self, now_ms: u32, transport: &mut T) -> Option<RunOutcome> {
        if !self.phase.is_active() {
            return None;
        }

        let run_started = *self.context.run_started_ms.get_or_insert(now_ms);
        self.context.elapsed_ms = elapsed_ms(now_ms, run_started);

        if self.cancel_requested {
            return Some(self.abort());
        }

        loop {
            let index = self.context.step_index;
            let Some(step) = self.sequence.as_ref().and_then(|s| s.get(index)) else {
                return Some(self.finish(RunOutcome::Succeeded));
            };

            match drive_step(&mut self.phase, &mut self.context, step, now_ms, transport) {
                StepProgress::Waiting => return None,
                StepProgress::Continue => {}
                StepProgress::Completed => {
                    if let Some(outcome) = self.complete_step(now_ms) {
                        return Some(outcome);
                    }
                }
                StepProgress::Failed(reason) => return Some(self.fail(reason)),
            }
        }
    }

    fn apply(&mut self, event: Event) {
        self.phase = self.phase.transition(event);
    }

    /// Move past the current step
    fn complete_step(&mut self, now_ms: u32) -> Option<RunOutcome> {
        debug!("Step {} done", self.context.step_index);
        self.context.step_index += 1;

        if self.context.step_index >= self.context.total_steps {
            info!("Sequence complete after {} ms", self.context.elapsed_ms);
            self.apply(Event::SequenceDone);
            return Some(self.finish(RunOutcome::Succeeded));
        }

        self.apply(Event::StepDone);
        // The next pre-delay runs from here
        self.context.begin_step(Some(now_ms));
        None
    }

    fn fail(&mut self, reason: FailureReason) -> RunOutcome {
        let index = self.context.step_index;
        let label = self
            .current_step()
            .map(|step| truncated(step.label()))
            .unwrap_or_default();
        warn!("Step {} ({}) failed: {}", index, label.as_str(), reason);

        self.apply(Event::StepFailed);
        self.finish(RunOutcome::Failed(StepFailure {
            index,
            label,
            reason,
        }))
    }

    fn abort(&mut self) -> RunOutcome {
        let index = self.context.step_index;
        info!("Sequence cancelled at step {}", index);
        self.cancel_requested = false;
        self.apply(Event::Cancel);
        self.finish(RunOutcome::Cancelled { index })
    }

    fn finish(&mut self, outcome: RunOutcome) -> RunOutcome {
        self.sequence = None;
        self.context.outcome = outcome.clone();
        outcome
    }
}

/// Drive `step` as far as the clock and the transport allow
fn drive_step<T: Transport>(
    phase: &mut Phase,
    ctx: &mut ExecutionContext,
    step: &Step,
    now_ms: u32,
    transport: &mut T,
) -> StepProgress {
    match (*phase, step) {
        (Phase::AwaitingPreDelay, _) => {
            let since = *ctx.step_started_ms.get_or_insert(now_ms);
            if !has_elapsed(now_ms, since, step.wait_ms()) {
                return StepProgress::Waiting;
            }
            match step {
                Step::Delay(_) => StepProgress::Completed,
                Step::Command(command) => {
                    trace!("Step {}: {}", ctx.step_index, command.label());
                    *phase = phase.transition(Event::DelayElapsed);
                    StepProgress::Continue
                }
            }
        }

        (Phase::Sending, Step::Command(command)) => {
            let first_attempt = *ctx.send_started_ms.get_or_insert(now_ms);
            match transport.try_send(encode(command)) {
                SendStatus::Accepted => {
                    debug!("Step {} sent", ctx.step_index);
                    *phase = phase.transition(Event::SendAccepted);
                    StepProgress::Continue
                }
                SendStatus::Busy => {
                    ctx.busy_retries = ctx.busy_retries.saturating_add(1);
                    debug!("Transport busy, retry {}", ctx.busy_retries);
                    if has_elapsed(now_ms, first_attempt, command.ack_timeout_ms()) {
                        StepProgress::Failed(FailureReason::Timeout)
                    } else {
                        StepProgress::Waiting
                    }
                }
            }
        }

        (Phase::AwaitingAck, Step::Command(command)) => match transport.poll_ack() {
            Some(AckStatus::Acknowledged) => {
                debug!("Step {} acknowledged", ctx.step_index);
                StepProgress::Completed
            }
            Some(AckStatus::Rejected) => StepProgress::Failed(FailureReason::TransportRejected),
            None => {
                let since = ctx.send_started_ms.unwrap_or(now_ms);
                if has_elapsed(now_ms, since, command.ack_timeout_ms()) {
                    StepProgress::Failed(FailureReason::Timeout)
                } else {
                    StepProgress::Waiting
                }
            }
        },

        // Nothing to send for a delay step
        (Phase::Sending | Phase::AwaitingAck, Step::Delay(_)) => StepProgress::Completed,

        (Phase::Idle | Phase::Aborted | Phase::Failed, _) => StepProgress::Waiting,
    }
}
