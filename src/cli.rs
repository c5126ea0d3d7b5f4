//! CLI argument parsing and command dispatch

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use object_ops::config::{self, Config};

use crate::commands;

/// Object Ops - Parse, match, resolve and merge object paths in JSON/YAML documents
#[derive(Parser, Debug)]
#[command(name = "object-ops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Configuration file. Defaults to .object-ops.yaml in the current directory, if present
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a path string and print its keys as JSON
    Parse(commands::parse::ParseArgs),

    /// Parse a path string and render it back to canonical text
    Stringify(commands::stringify::StringifyArgs),

    /// Resolve a path inside a JSON or YAML document
    Get(commands::get::GetArgs),

    /// Test a path against wildcard rules
    #[command(name = "match")]
    Match(commands::match_path::MatchArgs),

    /// Deep-merge one JSON or YAML document into another
    Merge(commands::merge::MergeArgs),

    /// Delete stale files from an output directory
    Clean(commands::clean::CleanArgs),
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        config::discover(self.config.as_deref(), Path::new(".")).with_context(|| match &self.config
        {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => format!("Failed to load {}", config::DEFAULT_CONFIG_FILE),
        })
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level);

        match &self.command {
            Commands::Parse(args) => commands::parse::execute(args),
            Commands::Stringify(args) => commands::stringify::execute(args, &self.load_config()?),
            Commands::Get(args) => commands::get::execute(args),
            Commands::Match(args) => commands::match_path::execute(args, &self.load_config()?),
            Commands::Merge(args) => commands::merge::execute(args, &self.load_config()?),
            Commands::Clean(args) => commands::clean::execute(args, &self.load_config()?),
        }
    }
}
