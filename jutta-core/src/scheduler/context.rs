//! Per-run execution state and outcomes

use core::fmt;

use crate::sequence::Label;

/// Why a step stopped the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureReason {
    /// No acknowledgement (or no send slot) within the step's timeout
    Timeout,
    /// Transport reported the command as not delivered
    TransportRejected,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout => f.write_str("timed out"),
            FailureReason::TransportRejected => f.write_str("rejected by transport"),
        }
    }
}

/// The step that failed a run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepFailure {
    /// Index of the failing step
    pub index: usize,
    /// Its label
    pub label: Label,
    pub reason: FailureReason,
}

/// Result of a sequence run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunOutcome {
    /// Run in progress, or nothing has run yet
    #[default]
    Pending,
    /// Every step completed in order
    Succeeded,
    /// A step failed, remaining steps were skipped
    Failed(StepFailure),
    /// Cancelled while step `index` was current
    Cancelled { index: usize },
}

impl RunOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, RunOutcome::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }
}

/// Mutable state of one run, owned by the executor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExecutionContext {
    /// Index of the current step (0-based)
    pub step_index: usize,
    /// Total steps in the running sequence
    pub total_steps: usize,
    /// First tick of the run
    pub run_started_ms: Option<u32>,
    /// When the current step became current
    ///
    /// `None` until the first tick observes the step.
    pub step_started_ms: Option<u32>,
    /// First `try_send` attempt for the current command step
    pub send_started_ms: Option<u32>,
    /// `Busy` answers seen for the current command step
    pub busy_retries: u32,
    /// Milliseconds since the run started, updated every tick
    pub elapsed_ms: u32,
    pub outcome: RunOutcome,
}

impl ExecutionContext {
    /// Fresh context for a run of `total_steps` steps
    pub fn for_run(total_steps: usize) -> Self {
        Self {
            total_steps,
            ..Self::default()
        }
    }

    /// Reset per-step timers, optionally arming the step timer at `now_ms`
    pub fn begin_step(&mut self, now_ms: Option<u32>) {
        self.step_started_ms = now_ms;
        self.send_started_ms = None;
        self.busy_retries = 0;
    }
}
