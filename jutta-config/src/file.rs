//! TOML sequence files

use std::collections::HashSet;

use jutta_core::config::StepConfig;
use jutta_core::sequence::Sequence;
use serde::{Deserialize, Serialize};

use crate::error::{TomlError, ValidationError};

/// One named sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceConfig {
    pub name: String,
    pub steps: Vec<StepConfig>,
}

impl SequenceConfig {
    /// Validate the steps into a runnable sequence
    pub fn build(&self) -> Result<Sequence, ValidationError> {
        Sequence::from_config(&self.steps).map_err(|error| ValidationError::Sequence {
            name: self.name.clone(),
            error,
        })
    }
}

/// Contents of a sequence file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceFile {
    #[serde(default, rename = "sequence")]
    pub sequences: Vec<SequenceConfig>,
}

impl SequenceFile {
    /// Parse and validate a TOML sequence file
    pub fn parse(text: &str) -> Result<Self, TomlError> {
        let file: SequenceFile = toml::from_str(text)?;
        file.validate()?;
        Ok(file)
    }

    /// Check names and every sequence's steps
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sequences.is_empty() {
            return Err(ValidationError::NoSequences);
        }

        let mut seen = HashSet::new();
        for sequence in &self.sequences {
            if sequence.name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
            if !seen.insert(sequence.name.as_str()) {
                return Err(ValidationError::DuplicateName(sequence.name.clone()));
            }
            sequence.build()?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SequenceConfig> {
        self.sequences.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.iter().map(|s| s.name.as_str())
    }

    /// Build the named sequence
    ///
    /// Returns `None` if no sequence has that name.
    pub fn build(&self, name: &str) -> Option<Result<Sequence, ValidationError>> {
        self.get(name).map(SequenceConfig::build)
    }
}
