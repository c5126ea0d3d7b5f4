//! # Merge Command Implementation
//!
//! Deep-merges a source document into a destination document, both JSON or
//! YAML by extension (the two may differ). A missing destination starts out
//! as null, so merging into it simply copies the source.
//!
//! ## Options
//!
//! - `--mode merge|append|replace` picks the assign mode. Without it the
//!   configured `mode` is used, and `merge` when nothing is configured.
//! - `--at PATH` merges the source at a location inside the destination,
//!   creating intermediate objects and arrays as needed.
//! - `--dry-run` prints the merged document instead of writing it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use log::info;

use object_ops::config::Config;
use object_ops::document::{self, Format};
use object_ops::merge::{assign, assign_at, AssignMode};

/// Deep-merge one JSON or YAML document into another
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Document to merge into; written back unless --dry-run is given
    pub dest: PathBuf,

    /// Document to merge from
    pub source: PathBuf,

    /// Assign mode: merge, append or replace
    #[arg(long, value_name = "MODE")]
    pub mode: Option<AssignMode>,

    /// Path inside the destination to merge at, e.g. `spec.items[0]`
    #[arg(long, value_name = "PATH")]
    pub at: Option<String>,

    /// Print the result instead of writing the destination
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `merge` command.
pub fn execute(args: &MergeArgs, config: &Config) -> Result<ExitCode> {
    let format = Format::from_path(&args.dest)?;
    let mode = args.mode.unwrap_or(config.mode);

    let source = document::load(&args.source)
        .with_context(|| format!("Failed to read {}", args.source.display()))?;
    let mut dest = document::load_or_null(&args.dest)
        .with_context(|| format!("Failed to read {}", args.dest.display()))?;

    match &args.at {
        Some(at) => {
            assign_at(&mut dest, at.as_str(), &source, mode)
                .with_context(|| format!("Cannot merge at '{}'", at))?;
        }
        None => assign(&mut dest, &source, mode),
    }

    if args.dry_run {
        print!("{}", document::render(format, &dest)?);
    } else {
        document::save(&args.dest, &dest)
            .with_context(|| format!("Failed to write {}", args.dest.display()))?;
        info!(
            "Merged {} into {} ({} mode)",
            args.source.display(),
            args.dest.display(),
            mode
        );
    }
    Ok(ExitCode::SUCCESS)
}
