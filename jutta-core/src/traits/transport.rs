//! Transport seam between the sequencer and the serial link

/// Result of offering a payload to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendStatus {
    /// Payload taken, an acknowledgement is now pending
    Accepted,
    /// Link cannot take a payload right now, offer it again later
    Busy,
}

/// Acknowledgement state for the last accepted payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckStatus {
    /// Machine confirmed the command
    Acknowledged,
    /// Link reported that the command did not go through
    Rejected,
}

/// Non-blocking command transport
///
/// Neither method may block. The executor calls `try_send` once per tick
/// until it gets `Accepted`, then calls `poll_ack` once per tick until it
/// gets an answer or the step times out.
///
/// A transport only tracks the acknowledgement of the most recent
/// accepted payload. Accepting a new payload discards any stale answer.
pub trait Transport {
    /// Offer a fully encoded payload
    fn try_send(&mut self, payload: &[u8]) -> SendStatus;

    /// Check for the acknowledgement of the last accepted payload
    ///
    /// Returns `None` while nothing has arrived yet.
    fn poll_ack(&mut self) -> Option<AckStatus>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn try_send(&mut self, payload: &[u8]) -> SendStatus {
        (**self).try_send(payload)
    }

    fn poll_ack(&mut self) -> Option<AckStatus> {
        (**self).poll_ack()
    }
}
