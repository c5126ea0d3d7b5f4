//! Implementation of the `clean` subcommand.
//!
//! Runs a single cleaner round over an output directory: every file already in
//! the directory that is not listed as emitted, and not excluded, is deleted.
//! Deleted paths are printed one per line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use object_ops::clean::OutputCleaner;
use object_ops::config::Config;

/// Delete stale files from an output directory
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Output directory to clean
    pub dir: PathBuf,

    /// Files emitted by the current build, relative to DIR
    #[arg(value_name = "EMITTED")]
    pub emitted: Vec<PathBuf>,

    /// Glob pattern for files that must be kept; adds to the configured ones
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

/// Execute the `clean` command.
pub fn execute(args: &CleanArgs, config: &Config) -> Result<ExitCode> {
    let patterns = config.clean.exclude.iter().chain(&args.exclude);
    let mut cleaner = OutputCleaner::new(patterns).context("Invalid --exclude pattern")?;

    cleaner.render_start(&args.dir);
    for path in cleaner.write_bundle(&args.dir, &args.emitted) {
        println!("{}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
