//! Implementation of the `stringify` subcommand.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use object_ops::config::Config;
use object_ops::path::{self, StringifyOptions};

/// Parse a path string and render it back to canonical text
#[derive(Args, Debug)]
pub struct StringifyArgs {
    /// The path text, e.g. `a.b[0].c`
    pub path: String,

    /// Prefix written before the first key, e.g. `$`
    #[arg(long, value_name = "SYMBOL")]
    pub root_symbol: Option<String>,

    /// Drop the leading `.` from the output
    #[arg(long)]
    pub no_starting_dot: bool,
}

/// Flags override the configured options.
fn options(args: &StringifyArgs, config: &Config) -> StringifyOptions {
    let mut options = config.stringify.clone();
    if let Some(symbol) = &args.root_symbol {
        options.root_symbol = symbol.clone();
    }
    if args.no_starting_dot {
        options.no_starting_dot = true;
    }
    options
}

/// Execute the `stringify` command.
pub fn execute(args: &StringifyArgs, config: &Config) -> Result<ExitCode> {
    let parsed = path::parse(&args.path)
        .with_context(|| format!("Invalid path '{}'", args.path))?;
    println!("{}", path::stringify(&parsed, &options(args, config)));
    Ok(ExitCode::SUCCESS)
}
