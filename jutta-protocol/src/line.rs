//! Line termination
//!
//! Every command sent to the machine ends with CR LF. Raw commands taken
//! from configuration are normalized here so they are terminated exactly
//! once.

use heapless::Vec;

/// Protocol line terminator
pub const LINE_TERMINATOR: &str = "\r\n";

/// Check whether `data` already ends with the line terminator
pub fn is_terminated(data: &[u8]) -> bool {
    data.ends_with(LINE_TERMINATOR.as_bytes())
}

/// Copy `text` into a fixed buffer, appending the terminator iff missing
///
/// Returns `None` if the terminated text does not fit into `N` bytes.
pub fn ensure_terminated<const N: usize>(text: &str) -> Option<Vec<u8, N>> {
    let mut out = Vec::new();
    out.extend_from_slice(text.as_bytes()).ok()?;
    if !is_terminated(&out) {
        out.extend_from_slice(LINE_TERMINATOR.as_bytes()).ok()?;
    }
    Some(out)
}

/// Remove one trailing terminator, if present
pub fn strip_terminator(text: &str) -> &str {
    text.strip_suffix(LINE_TERMINATOR).unwrap_or(text)
}
