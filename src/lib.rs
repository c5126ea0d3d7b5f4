//! # Object Ops Library
//!
//! Path-addressed operations over nested data: parse path strings such as
//! `a.b[0].c` into key sequences, resolve them against a value tree, test them
//! against wildcard rules, and deep-merge one tree into another. The
//! `object-ops` command-line tool is a thin wrapper around this crate.
//!
//! ## Quick Example
//!
//! ```
//! use object_ops::matcher::PathRuleSet;
//! use object_ops::merge::merge;
//! use object_ops::path::parse;
//! use object_ops::resolve::{get, GetOptions};
//! use object_ops::value::Value;
//! use serde_json::json;
//!
//! // Match concrete paths against wildcard rules
//! let rules = PathRuleSet::parse_all(["a.b", "c.*"]).unwrap();
//! assert!(rules.matches(parse("c.d.e").unwrap().keys()));
//! assert!(!rules.matches(parse("x.y").unwrap().keys()));
//!
//! // Deep-merge one tree into another
//! let mut target = Value::from(json!({"a": 1, "b": {"c": 2}}));
//! merge(&mut target, &Value::from(json!({"b": {"d": 3}})));
//!
//! // Resolve a path, with a fallback for misses
//! let found = get(&target, "b.d", &GetOptions::default()).unwrap();
//! assert_eq!(found, Some(&Value::from(3.0)));
//! let fallback = Value::from("none");
//! let missing = get(&target, "b.x", &GetOptions::default().fallback(&fallback)).unwrap();
//! assert_eq!(missing, Some(&fallback));
//! ```
//!
//! ## Core Concepts
//!
//! - **Values (`value`)**: A closed tree of null, booleans, numbers, strings,
//!   arrays, string-keyed records, and maps and sets keyed by primitives.
//! - **Paths (`path`)**: The path grammar, [`path::ObjectPath`] key sequences
//!   with explicit wildcard keys, and rendering paths back to text.
//! - **Resolution (`resolve`)**: Read-only lookup with fallbacks and windows,
//!   plus mutable navigation that creates missing containers.
//! - **Matching (`matcher`)**: Disjunctive wildcard rule sets.
//! - **Assigning (`merge`)**: Deep merge, append and replace of value trees.
//! - **Documents (`document`)**: JSON and YAML files in and out of [`value::Value`].
//! - **Output cleanup (`clean`)**: Deleting stale build output between rounds.
//! - **Configuration (`config`)**: The optional `.object-ops.yaml` file.

pub mod clean;
pub mod config;
pub mod document;
pub mod error;
pub mod matcher;
pub mod merge;
pub mod path;
pub mod resolve;
pub mod value;

#[cfg(test)]
mod path_proptest;
