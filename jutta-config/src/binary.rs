//! Binary sequence images
//!
//! A postcard encoding of a [`SequenceFile`] behind a one-byte format
//! version, for storing sequences in device flash. Decoded images are
//! validated exactly like TOML files.

use crate::error::BinaryError;
use crate::file::SequenceFile;

/// Current image format version
pub const BINARY_VERSION: u8 = 1;

/// Encode a validated sequence file
pub fn to_bytes(file: &SequenceFile) -> Result<Vec<u8>, BinaryError> {
    file.validate()?;
    let body = postcard::to_allocvec(file).map_err(|_| BinaryError::Serialize)?;

    let mut image = Vec::with_capacity(body.len() + 1);
    image.push(BINARY_VERSION);
    image.extend_from_slice(&body);
    Ok(image)
}

/// Decode and validate an image
pub fn from_bytes(bytes: &[u8]) -> Result<SequenceFile, BinaryError> {
    let (&version, body) = bytes.split_first().ok_or(BinaryError::Deserialize)?;
    if version != BINARY_VERSION {
        return Err(BinaryError::VersionMismatch { found: version });
    }

    let file: SequenceFile = postcard::from_bytes(body).map_err(|_| BinaryError::Deserialize)?;
    file.validate()?;
    Ok(file)
}
