//! Transport implementations

pub mod line;

pub use line::{LineTransport, LinkError, RX_CHUNK_LEN, TX_BUFFER_LEN};
