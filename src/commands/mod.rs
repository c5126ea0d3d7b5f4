//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `object-ops` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` (and the loaded
//!   configuration, for commands that use it) and returns the process exit
//!   code.
//!
//! Commands that answer a yes/no question (`get`, `match`) report "no" through
//! exit code 1 rather than an error, so scripts can branch on them.

pub mod clean;
pub mod get;
pub mod match_path;
pub mod merge;
pub mod parse;
pub mod stringify;
