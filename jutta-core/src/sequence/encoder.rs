//! Command encoder
//!
//! Turns a command step into the exact bytes written to the machine.
//! Symbolic commands come straight from the static command table. Raw
//! text is normalized once when the step is built, so encoding never
//! allocates and never fails.

use heapless::Vec;
use jutta_protocol::ensure_terminated;

use super::step::{CommandPayload, CommandStep};
use crate::config::MAX_PAYLOAD_LEN;

/// Encoded command bytes
pub type Payload = Vec<u8, MAX_PAYLOAD_LEN>;

/// Normalize raw protocol text
///
/// Appends the line terminator iff `text` does not already end with it.
/// Returns `None` if the result does not fit a [`Payload`].
pub fn encode_raw(text: &str) -> Option<Payload> {
    ensure_terminated::<MAX_PAYLOAD_LEN>(text)
}

/// Bytes to send for a command step
pub fn encode(step: &CommandStep) -> &[u8] {
    match step.payload() {
        CommandPayload::Symbolic(command) => command.payload().as_bytes(),
        CommandPayload::Raw(bytes) => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jutta_protocol::SymbolicCommand;
    use proptest::prelude::*;

    #[test]
    fn test_symbolic_uses_table() {
        let step = CommandStep::symbolic(SymbolicCommand::GrinderOn);
        assert_eq!(encode(&step), b"FN:07\r\n");

        let step = CommandStep::symbolic(SymbolicCommand::WaterPumpOff);
        assert_eq!(encode(&step), b"FN:04\r\n");
    }

    #[test]
    fn test_raw_gets_terminator() {
        let step = CommandStep::raw("FN:0A").unwrap();
        assert_eq!(encode(&step), b"FN:0A\r\n");
    }

    #[test]
    fn test_raw_keeps_existing_terminator() {
        let step = CommandStep::raw("FN:0A\r\n").unwrap();
        assert_eq!(encode(&step), b"FN:0A\r\n");
    }

    #[test]
    fn test_raw_bare_cr_is_not_a_terminator() {
        let step = CommandStep::raw("TY:\r").unwrap();
        assert_eq!(encode(&step), b"TY:\r\r\n");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let step = CommandStep::raw("AN:0A").unwrap();
        assert_eq!(encode(&step), encode(&step.clone()));
    }

    proptest! {
        #[test]
        fn prop_raw_ends_with_single_terminator(body in "[A-Z]{2}:[0-9A-F]{0,20}") {
            let once = encode_raw(&body).unwrap();
            prop_assert!(once.ends_with(b"\r\n"));
            prop_assert!(!once.ends_with(b"\r\n\r\n"));

            let text = core::str::from_utf8(&once).unwrap();
            let twice = encode_raw(text).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
