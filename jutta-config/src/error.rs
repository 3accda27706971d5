//! Error types

use std::fmt;

use jutta_core::config::ConfigError;

/// A sequence file that parsed but does not make sense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// File defines no sequences
    NoSequences,
    /// Two sequences share a name
    DuplicateName(String),
    /// Sequence with an empty name
    EmptyName,
    /// Named sequence failed validation
    Sequence { name: String, error: ConfigError },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoSequences => f.write_str("no [[sequence]] defined"),
            ValidationError::DuplicateName(name) => write!(f, "duplicate sequence name '{}'", name),
            ValidationError::EmptyName => f.write_str("sequence name must not be empty"),
            ValidationError::Sequence { name, error } => write!(f, "[sequence '{}'] {}", name, error),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure loading a TOML sequence file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TomlError {
    /// Syntax or schema error reported by the TOML parser
    Parse(String),
    Invalid(ValidationError),
}

impl From<toml::de::Error> for TomlError {
    fn from(e: toml::de::Error) -> Self {
        TomlError::Parse(e.to_string())
    }
}

impl From<ValidationError> for TomlError {
    fn from(e: ValidationError) -> Self {
        TomlError::Invalid(e)
    }
}

impl fmt::Display for TomlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlError::Parse(msg) => write!(f, "invalid TOML: {}", msg.trim_end()),
            TomlError::Invalid(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for TomlError {}

/// Failure reading or writing a binary image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Image written by a different format version
    VersionMismatch { found: u8 },
    Invalid(ValidationError),
}

impl From<ValidationError> for BinaryError {
    fn from(e: ValidationError) -> Self {
        BinaryError::Invalid(e)
    }
}

impl fmt::Display for BinaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryError::Serialize => f.write_str("failed to serialize sequences"),
            BinaryError::Deserialize => f.write_str("corrupt sequence image"),
            BinaryError::VersionMismatch { found } => write!(
                f,
                "sequence image version {} (expected {})",
                found,
                crate::BINARY_VERSION
            ),
            BinaryError::Invalid(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for BinaryError {}
