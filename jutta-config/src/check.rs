//! Sequence file checker
//!
//! Everything behind the `jutta-check` binary: argument parsing, the
//! per-sequence summary and the optional binary image. Output goes to any
//! [`Write`] so the report can be captured.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use jutta_core::sequence::{encode, Sequence, Step};

use crate::{to_bytes, BinaryError, SequenceFile, TomlError};

/// Validate a JUTTA sequence file and summarize its sequences
#[derive(Parser, Debug)]
#[command(name = "jutta-check")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Sequence file (TOML)
    pub path: PathBuf,

    /// Also write the binary image for the device
    #[arg(long, value_name = "PATH")]
    pub emit: Option<PathBuf>,
}

/// Why a check failed
#[derive(Debug)]
pub enum CheckError {
    Read { path: PathBuf, error: io::Error },
    Invalid { path: PathBuf, error: TomlError },
    Encode(BinaryError),
    Write { path: PathBuf, error: io::Error },
    /// Report could not be written
    Output(io::Error),
}

impl From<io::Error> for CheckError {
    fn from(e: io::Error) -> Self {
        CheckError::Output(e)
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Read { path, .. } => write!(f, "failed to read {}", path.display()),
            CheckError::Invalid { path, .. } => {
                write!(f, "invalid sequence file {}", path.display())
            }
            CheckError::Encode(_) => f.write_str("failed to encode sequences"),
            CheckError::Write { path, .. } => write!(f, "failed to write {}", path.display()),
            CheckError::Output(_) => f.write_str("failed to write report"),
        }
    }
}

impl Error for CheckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CheckError::Read { error, .. } | CheckError::Write { error, .. } => Some(error),
            CheckError::Invalid { error, .. } => Some(error),
            CheckError::Encode(error) => Some(error),
            CheckError::Output(error) => Some(error),
        }
    }
}

/// Check the file named by `args`, writing the report to `out`
///
/// Returns the number of sequences in the file.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<usize, CheckError> {
    let text = fs::read_to_string(&args.path).map_err(|error| CheckError::Read {
        path: args.path.clone(),
        error,
    })?;

    let file = SequenceFile::parse(&text).map_err(|error| CheckError::Invalid {
        path: args.path.clone(),
        error,
    })?;

    for config in &file.sequences {
        // Already validated by parse
        if let Ok(sequence) = config.build() {
            write_summary(out, &config.name, &sequence)?;
        }
    }

    if let Some(image_path) = &args.emit {
        let image = to_bytes(&file).map_err(CheckError::Encode)?;
        fs::write(image_path, &image).map_err(|error| CheckError::Write {
            path: image_path.clone(),
            error,
        })?;
        writeln!(out, "wrote {} bytes to {}", image.len(), image_path.display())?;
    }

    writeln!(
        out,
        "{}: {} sequence(s) OK",
        args.path.display(),
        file.sequences.len()
    )?;
    Ok(file.sequences.len())
}

fn write_summary<W: Write>(out: &mut W, name: &str, sequence: &Sequence) -> io::Result<()> {
    writeln!(
        out,
        "[{}] {} steps, at least {} ms",
        name,
        sequence.len(),
        sequence.min_duration_ms()
    )?;
    for (index, step) in sequence.iter().enumerate() {
        match step {
            Step::Command(command) => {
                let wire = String::from_utf8_lossy(encode(command));
                write!(
                    out,
                    "  {:>2}. {:<32} {:<12}",
                    index,
                    command.label(),
                    wire.trim_end()
                )?;
                if command.pre_delay_ms() > 0 {
                    write!(out, " after {} ms", command.pre_delay_ms())?;
                }
                writeln!(out, " (timeout {} ms)", command.ack_timeout_ms())?;
            }
            Step::Delay(delay) => {
                writeln!(
                    out,
                    "  {:>2}. {:<32} wait {} ms",
                    index,
                    delay.label(),
                    delay.wait_ms()
                )?;
            }
        }
    }
    Ok(())
}
