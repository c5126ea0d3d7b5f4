//! # Parse Command Implementation
//!
//! Prints the key sequence of a path string as a JSON array. Text keys print
//! as strings, indices as numbers, and the wildcards as `"*"` and `"[*]"`:
//!
//! ```text
//! $ object-ops parse 'servers[0].tags[*]'
//! ["servers",0,"tags","[*]"]
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use object_ops::path;

/// Parse a path string and print its keys as JSON
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// The path text, e.g. `a.b[0].c`
    pub path: String,
}

/// Execute the `parse` command.
pub fn execute(args: &ParseArgs) -> Result<ExitCode> {
    let parsed = path::parse(&args.path)
        .with_context(|| format!("Invalid path '{}'", args.path))?;
    println!("{}", serde_json::to_string(parsed.keys())?);
    Ok(ExitCode::SUCCESS)
}
