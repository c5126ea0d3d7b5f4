//! # Object Ops CLI
//!
//! This is the binary entry point for the `object-ops` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into
//!   user-friendly output and exit codes.
//!
//! The core logic lives in the `object_ops` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.execute()
}
