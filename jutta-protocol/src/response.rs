//! Response line parsing
//!
//! The machine answers on the same half-duplex link. Responses are CR LF
//! terminated text lines; `ok:` acknowledges the last command and anything
//! else (status dumps, type strings, echo noise) is passed through as-is.

use heapless::Vec;

/// Line sent by the machine when it accepted a command
pub const ACK_LINE: &str = "ok:";

/// Longest response line kept; longer lines are discarded
pub const MAX_LINE_LEN: usize = 64;

/// Errors while assembling response lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded `MAX_LINE_LEN`; the partial line was dropped
    Overflow,
}

/// A complete response line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// `ok:` acknowledgment
    Ack,
    /// Any other line, terminator stripped
    Other(Vec<u8, MAX_LINE_LEN>),
}

impl Response {
    /// Classify a line (without terminator)
    pub fn classify(line: &[u8]) -> Self {
        if line == ACK_LINE.as_bytes() {
            return Response::Ack;
        }
        let mut other = Vec::new();
        // Callers never pass more than MAX_LINE_LEN bytes
        let _ = other.extend_from_slice(&line[..line.len().min(MAX_LINE_LEN)]);
        Response::Other(other)
    }

    /// Check if this line acknowledges a command
    pub fn is_ack(&self) -> bool {
        matches!(self, Response::Ack)
    }
}

/// Incremental line assembler
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes of the partial line buffered so far
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(response))` when a line completes, `Ok(None)` when
    /// more bytes are needed. An overlong line is reported once as
    /// `Err(LineError::Overflow)` and the rest of it is skipped up to the
    /// next line feed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Response>, LineError> {
        if byte == b'\n' {
            if self.overflowed {
                self.reset();
                return Ok(None);
            }
            let mut line: &[u8] = &self.buffer;
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }
            let response = if line.is_empty() {
                None
            } else {
                Some(Response::classify(line))
            };
            self.reset();
            return Ok(response);
        }

        if self.overflowed {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.overflowed = true;
            return Err(LineError::Overflow);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed bytes until the first complete line
    fn feed_bytes(parser: &mut LineParser, bytes: &[u8]) -> Result<Option<Response>, LineError> {
        for &byte in bytes {
            if let Some(response) = parser.feed(byte)? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }

    #[test]
    fn test_ack_line() {
        let mut parser = LineParser::new();
        let response = feed_bytes(&mut parser, b"ok:\r\n").unwrap();
        assert_eq!(response, Some(Response::Ack));
        assert_eq!(parser.pending(), 0);
    }

    #[test]
    fn test_other_line() {
        let mut parser = LineParser::new();
        let response = feed_bytes(&mut parser, b"ty:EF532M V02.03\r\n").unwrap().unwrap();
        assert!(!response.is_ack());
        match response {
            Response::Other(line) => assert_eq!(&line[..], b"ty:EF532M V02.03"),
            Response::Ack => panic!("expected other line"),
        }
    }

    #[test]
    fn test_partial_line_needs_more_bytes() {
        let mut parser = LineParser::new();
        assert_eq!(feed_bytes(&mut parser, b"ok"), Ok(None));
        assert_eq!(parser.pending(), 2);
        assert_eq!(feed_bytes(&mut parser, b":\r\n"), Ok(Some(Response::Ack)));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let mut parser = LineParser::new();
        assert_eq!(feed_bytes(&mut parser, b"\r\n\r\n"), Ok(None));
        assert_eq!(feed_bytes(&mut parser, b"ok:\r\n"), Ok(Some(Response::Ack)));
    }

    #[test]
    fn test_bare_line_feed_terminates() {
        let mut parser = LineParser::new();
        assert_eq!(feed_bytes(&mut parser, b"ok:\n"), Ok(Some(Response::Ack)));
    }

    #[test]
    fn test_overflow_skips_rest_of_line() {
        let mut parser = LineParser::new();
        let long = [b'x'; MAX_LINE_LEN + 10];

        assert_eq!(feed_bytes(&mut parser, &long), Err(LineError::Overflow));
        // Remainder of the long line is ignored
        assert_eq!(feed_bytes(&mut parser, &long[..5]), Ok(None));
        assert_eq!(feed_bytes(&mut parser, b"\r\n"), Ok(None));
        // Parser recovers on the next line
        assert_eq!(feed_bytes(&mut parser, b"ok:\r\n"), Ok(Some(Response::Ack)));
    }
}
