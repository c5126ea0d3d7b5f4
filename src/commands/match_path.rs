//! Implementation of the `match` subcommand.
//!
//! Prints `match` and exits 0 when the path matches any rule, otherwise prints
//! `no match` and exits 1. Rules given with `--rule` replace the configured
//! ones.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use log::warn;

use object_ops::config::Config;
use object_ops::matcher::PathRuleSet;
use object_ops::path;

/// Test a path against wildcard rules
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// The concrete path to test, e.g. `a.b[0]`
    pub path: String,

    /// A rule such as `a.*` or `items[*]`; repeat for several rules
    #[arg(long = "rule", value_name = "RULE")]
    pub rules: Vec<String>,
}

fn rules(args: &MatchArgs, config: &Config) -> Result<PathRuleSet> {
    if args.rules.is_empty() {
        return Ok(config.rules.clone());
    }
    PathRuleSet::parse_all(&args.rules).context("Invalid --rule")
}

/// Execute the `match` command.
pub fn execute(args: &MatchArgs, config: &Config) -> Result<ExitCode> {
    let subject = path::parse(&args.path)
        .with_context(|| format!("Invalid path '{}'", args.path))?;
    let rules = rules(args, config)?;
    if rules.is_empty() {
        warn!("No rules given and none configured; nothing can match");
    }

    if rules.matches(subject.keys()) {
        println!("match");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("no match");
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_rules_replace_configured_rules() {
        let mut config = Config::default();
        config.rules = PathRuleSet::parse_all(["x.y"]).unwrap();

        let args = MatchArgs {
            path: "a.b".to_string(),
            rules: vec!["a.*".to_string()],
        };
        let rules = rules(&args, &config).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.matches(path::parse("a.b").unwrap().keys()));
    }

    #[test]
    fn test_configured_rules_used_without_flags() {
        let mut config = Config::default();
        config.rules = PathRuleSet::parse_all(["x.y", "z[*]"]).unwrap();

        let args = MatchArgs {
            path: "z[3]".to_string(),
            rules: Vec::new(),
        };
        assert_eq!(rules(&args, &config).unwrap(), config.rules);
    }

    #[test]
    fn test_invalid_rule_is_error() {
        let args = MatchArgs {
            path: "a".to_string(),
            rules: vec!["a[".to_string()],
        };
        assert!(rules(&args, &Config::default()).is_err());
    }
}
