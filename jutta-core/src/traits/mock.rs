//! Scripted transport for executor and device tests

use heapless::Vec;

use super::{AckStatus, SendStatus, Transport};

/// How the mock answers an accepted payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckScript {
    /// Acknowledge on the given poll (1 = first poll after acceptance)
    AfterPolls(u32),
    /// Report a rejection on the first poll
    Reject,
    /// Never answer
    Silent,
}

/// In-memory transport recording every accepted payload
pub struct MockTransport {
    /// Payloads accepted so far, in order
    pub sent: Vec<Vec<u8, 32>, 32>,
    /// Remaining `Busy` answers before the next payload is accepted
    pub busy_remaining: u32,
    /// Total `try_send` calls
    pub send_attempts: u32,
    /// Total `poll_ack` calls
    pub polls: u32,
    ack: AckScript,
    polls_since_send: u32,
    pending: bool,
}

impl MockTransport {
    pub fn new(ack: AckScript) -> Self {
        Self {
            sent: Vec::new(),
            busy_remaining: 0,
            send_attempts: 0,
            polls: 0,
            ack,
            polls_since_send: 0,
            pending: false,
        }
    }

    /// Acknowledges every payload on the first poll
    pub fn acking() -> Self {
        Self::new(AckScript::AfterPolls(1))
    }

    pub fn with_busy(mut self, count: u32) -> Self {
        self.busy_remaining = count;
        self
    }

    pub fn set_ack(&mut self, ack: AckScript) {
        self.ack = ack;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }
}

impl Transport for MockTransport {
    fn try_send(&mut self, payload: &[u8]) -> SendStatus {
        self.send_attempts += 1;
        if self.busy_remaining > 0 {
            self.busy_remaining -= 1;
            return SendStatus::Busy;
        }
        let mut copy = Vec::new();
        let _ = copy.extend_from_slice(payload);
        let _ = self.sent.push(copy);
        self.pending = true;
        self.polls_since_send = 0;
        SendStatus::Accepted
    }

    fn poll_ack(&mut self) -> Option<AckStatus> {
        self.polls += 1;
        if !self.pending {
            return None;
        }
        self.polls_since_send += 1;
        match self.ack {
            AckScript::AfterPolls(n) if self.polls_since_send >= n => {
                self.pending = false;
                Some(AckStatus::Acknowledged)
            }
            AckScript::Reject => {
                self.pending = false;
                Some(AckStatus::Rejected)
            }
            _ => None,
        }
    }
}
