//! jutta-check
//!
//! Validates a sequence file and prints a summary of every sequence.
//! With `--emit <path>` it also writes the binary image for the device.
//!
//! Exit code 0 when the file is valid, 1 otherwise.

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use jutta_config::check::{run, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args, &mut io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            if let Some(source) = error.source() {
                for line in source.to_string().lines() {
                    eprintln!("  | {}", line);
                }
            }
            ExitCode::FAILURE
        }
    }
}
