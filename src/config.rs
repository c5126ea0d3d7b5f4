//! # Configuration
//!
//! An optional `.object-ops.yaml` file supplies defaults for the command-line
//! tool:
//!
//! ```yaml
//! mode: append            # default assign mode for `merge`
//! stringify:
//!   root_symbol: "$"
//!   no_starting_dot: false
//! rules:                  # default rule set for `match`
//!   - "a.b"
//!   - "c.*"
//! clean:
//!   exclude: ["**/*.map"]
//! ```
//!
//! Every field is optional. Unknown fields are rejected, and rules are parsed
//! with the path grammar while the file is read, so a bad rule is reported
//! together with the rest of the configuration errors.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matcher::PathRuleSet;
use crate::merge::AssignMode;
use crate::path::StringifyOptions;

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = ".object-ops.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Assign mode used by `merge` when `--mode` is not given.
    pub mode: AssignMode,
    /// Options used by `stringify` when no flags are given.
    pub stringify: StringifyOptions,
    /// Rules used by `match` when no `--rule` is given.
    pub rules: PathRuleSet,
    pub clean: CleanConfig,
}

/// Output cleaner settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    /// Glob patterns for files the cleaner must never delete.
    pub exclude: Vec<String>,
}

fn hint_for(message: &str) -> Option<String> {
    if message.contains("unknown field") {
        Some("Supported top-level fields are `mode`, `stringify`, `rules` and `clean`".to_string())
    } else if message.contains("unknown variant") {
        Some("`mode` must be one of `merge`, `append` or `replace`".to_string())
    } else if message.contains("Path parse error") {
        Some("Rules are path strings such as `a.b[0]`, `a.*` or `items[*]`".to_string())
    } else {
        None
    }
}

fn config_error(err: serde_yaml::Error) -> Error {
    let message = err.to_string();
    let hint = hint_for(&message);
    Error::ConfigParse { message, hint }
}

/// Parse a configuration from YAML text. Empty text yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str::<Config>(yaml_content).map_err(config_error)
}

/// Parse a configuration from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load the configuration the command-line tool should use.
///
/// An explicit path must exist. Otherwise [`DEFAULT_CONFIG_FILE`] in `dir` is
/// used when present, and the defaults when it is not.
pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(Config::default());
            }
            candidate
        }
    };
    debug!("Loading configuration from {}", path.display());
    from_file(&path)
}
