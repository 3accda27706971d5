//! Line-oriented UART transport
//!
//! The service port is half duplex: one command line goes out, the machine
//! answers with one or more lines, and `ok:` confirms the command. The
//! transport never blocks. Outgoing bytes are kept in a small buffer and
//! drained whenever the UART has room; incoming bytes are assembled into
//! lines on every poll.

use heapless::Vec;
use jutta_core::config::MAX_PAYLOAD_LEN;
use jutta_core::traits::{AckStatus, SendStatus, Transport};
use jutta_hal::{UartRx, UartTx};
use jutta_protocol::{LineError, LineParser, Response, JUTTA_GET_TYPE, MAX_LINE_LEN};

/// Outgoing buffer size, one encoded command
pub const TX_BUFFER_LEN: usize = MAX_PAYLOAD_LEN;

/// Bytes read from the UART per call
pub const RX_CHUNK_LEN: usize = 16;

/// Serial link failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// UART refused a write
    Write,
    /// UART reported a receive error
    Read,
    /// Payload larger than the TX buffer
    PayloadTooLong,
    /// Response line longer than the line buffer
    LineOverflow,
}

impl From<LineError> for LinkError {
    fn from(error: LineError) -> Self {
        match error {
            LineError::Overflow => LinkError::LineOverflow,
        }
    }
}

/// [`Transport`] over a UART speaking the JUTTA line protocol
///
/// The UART must already be set up with
/// [`UartConfig::JUTTA`](jutta_hal::UartConfig::JUTTA).
pub struct LineTransport<U> {
    uart: U,
    tx: Vec<u8, TX_BUFFER_LEN>,
    tx_pos: usize,
    parser: LineParser,
    awaiting_ack: bool,
    send_failed: bool,
    last_error: Option<LinkError>,
    last_response: Option<Vec<u8, MAX_LINE_LEN>>,
}

impl<U: UartTx + UartRx> LineTransport<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            tx: Vec::new(),
            tx_pos: 0,
            parser: LineParser::new(),
            awaiting_ack: false,
            send_failed: false,
            last_error: None,
            last_response: None,
        }
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    pub fn into_uart(self) -> U {
        self.uart
    }

    /// Most recent link error, if any
    pub fn last_error(&self) -> Option<LinkError> {
        self.last_error
    }

    /// Last non-`ok:` line the machine sent
    pub fn last_response(&self) -> Option<&[u8]> {
        self.last_response.as_deref()
    }

    /// Ask the machine for its model string
    ///
    /// Doubles as a heartbeat. Only use while no sequence is running; the
    /// `ty:` answer shows up in [`last_response`](Self::last_response).
    pub fn request_type(&mut self) -> SendStatus {
        self.try_send(JUTTA_GET_TYPE.as_bytes())
    }

    /// Bytes of the current payload not yet taken by the UART
    pub fn pending_tx(&self) -> usize {
        self.tx.len() - self.tx_pos
    }

    /// An accepted payload is still waiting for its acknowledgement
    pub fn is_awaiting_ack(&self) -> bool {
        self.awaiting_ack
    }

    /// Push buffered bytes into the UART until it stops taking them
    ///
    /// Returns `false` if the UART refused a write. The payload is dropped
    /// and the failure is reported by the next [`Transport::poll_ack`].
    fn flush(&mut self) -> bool {
        while self.tx_pos < self.tx.len() {
            match self.uart.try_write(&self.tx[self.tx_pos..]) {
                Ok(0) => break,
                Ok(n) => self.tx_pos += n,
                Err(_) => {
                    error!("UART write failed");
                    self.fail_send(LinkError::Write);
                    return false;
                }
            }
        }
        true
    }

    fn fail_send(&mut self, error: LinkError) {
        self.last_error = Some(error);
        self.send_failed = true;
        self.tx.clear();
        self.tx_pos = 0;
    }

    /// Throw away everything received so far
    fn discard_rx(&mut self) {
        let mut chunk = [0u8; RX_CHUNK_LEN];
        loop {
            match self.uart.try_read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => trace!("Discarding {} stale bytes", n),
                Err(_) => {
                    self.last_error = Some(LinkError::Read);
                    break;
                }
            }
        }
        self.parser.reset();
    }

    /// Feed received bytes to the line parser until an `ok:` shows up
    fn receive_ack(&mut self) -> bool {
        loop {
            let byte = match self.uart.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => return false,
                Err(_) => {
                    error!("UART read failed");
                    self.last_error = Some(LinkError::Read);
                    return false;
                }
            };

            match self.parser.feed(byte) {
                Ok(Some(response)) if response.is_ack() => return true,
                Ok(Some(Response::Other(line))) => {
                    debug!("Ignoring response {=[u8]:a}", &line[..]);
                    self.last_response = Some(line);
                }
                Ok(Some(Response::Ack)) | Ok(None) => {}
                Err(error) => {
                    warn!("Response line too long, dropped");
                    self.last_error = Some(error.into());
                }
            }
        }
    }
}

impl<U: UartTx + UartRx> Transport for LineTransport<U> {
    fn try_send(&mut self, payload: &[u8]) -> SendStatus {
        // Leave a failed drain of the previous payload for poll_ack to report
        if !self.flush() || self.pending_tx() > 0 {
            return SendStatus::Busy;
        }

        // A new command makes any earlier answer meaningless
        self.discard_rx();
        self.awaiting_ack = true;
        self.send_failed = false;
        self.tx.clear();
        self.tx_pos = 0;

        if self.tx.extend_from_slice(payload).is_err() {
            error!("Payload of {} bytes does not fit the TX buffer", payload.len());
            self.fail_send(LinkError::PayloadTooLong);
            return SendStatus::Accepted;
        }

        self.flush();
        SendStatus::Accepted
    }

    fn poll_ack(&mut self) -> Option<AckStatus> {
        self.flush();
        if !self.awaiting_ack {
            return None;
        }

        if self.send_failed {
            self.awaiting_ack = false;
            self.send_failed = false;
            return Some(AckStatus::Rejected);
        }

        // Lines heard before the command is fully out answer something else
        if self.pending_tx() > 0 {
            self.discard_rx();
            return None;
        }

        if self.receive_ack() {
            self.awaiting_ack = false;
            return Some(AckStatus::Acknowledged);
        }
        None
    }
}
