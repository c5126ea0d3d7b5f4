//! # Get Command Implementation
//!
//! Resolves a path inside a JSON or YAML document and prints the value found
//! there as JSON. When nothing resolves and no `--fallback` is given, nothing
//! is printed and the command exits with code 1.
//!
//! `--start` and `--end` restrict the walk to a window of the path's keys, so
//! `get doc.json a.b.c --start 1` resolves `b.c` from the document root.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use object_ops::document;
use object_ops::resolve::{get, GetOptions};
use object_ops::value::Value;

/// Resolve a path inside a JSON or YAML document
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document to read (.json, .yaml or .yml)
    pub file: PathBuf,

    /// Path to resolve, e.g. `a.b[0].c`
    pub path: String,

    /// JSON value printed when the path is missing or null
    #[arg(long, value_name = "JSON")]
    pub fallback: Option<String>,

    /// Index of the first path key to walk
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub start: usize,

    /// Index one past the last path key to walk
    #[arg(long, value_name = "N")]
    pub end: Option<usize>,
}

/// Execute the `get` command.
pub fn execute(args: &GetArgs) -> Result<ExitCode> {
    let root = document::load(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let fallback = args
        .fallback
        .as_deref()
        .map(|text| serde_json::from_str::<serde_json::Value>(text).map(Value::from))
        .transpose()
        .context("--fallback must be valid JSON")?;

    let mut options = GetOptions::default().start(args.start);
    if let Some(end) = args.end {
        options = options.end(end);
    }
    if let Some(fallback) = &fallback {
        options = options.fallback(fallback);
    }

    match get(&root, args.path.as_str(), &options)? {
        Some(value) => {
            println!("{}", serde_json::to_string(&serde_json::Value::from(value))?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            debug!("Nothing found at '{}' in {}", args.path, args.file.display());
            Ok(ExitCode::FAILURE)
        }
    }
}
