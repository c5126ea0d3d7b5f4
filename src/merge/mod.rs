//! Deep assign engine
//!
//! This module combines a source [`Value`] into a target value in place. The
//! target is mutated; the source is only read, and every subtree taken from it
//! is deep-cloned, so the result never shares structure with the source.
//!
//! ## Modes
//!
//! - `merge`: containers of the same kind are combined recursively; arrays are
//!   merged index by index; anything else is overwritten by the source.
//! - `append`: like `merge`, but arrays are concatenated.
//! - `replace`: like `merge`, but keys and set elements missing from the
//!   source are removed and arrays are truncated to the source's length.
//!
//! ## Example
//!
//! ```
//! use object_ops::merge::merge;
//! use object_ops::value::Value;
//! use serde_json::json;
//!
//! let mut target = Value::from(json!({"a": 1, "b": {"c": 2}}));
//! let source = Value::from(json!({"b": {"d": 3}, "e": 4}));
//! merge(&mut target, &source);
//! assert_eq!(target, Value::from(json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4})));
//! ```

mod classify;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

pub use classify::{classify, Classification};

use crate::error::Result;
use crate::path::{ObjectPath, PathKey};
use crate::resolve::{entry_mut, PathSource};
use crate::value::{Primitive, Record, Value, ValueMap, ValueSet};

/// How containers are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignMode {
    /// Deep combine; arrays merged by index.
    #[default]
    Merge,
    /// Deep combine; arrays concatenated.
    Append,
    /// Deep combine, then prune what the source does not have.
    Replace,
}

impl fmt::Display for AssignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssignMode::Merge => "merge",
            AssignMode::Append => "append",
            AssignMode::Replace => "replace",
        };
        f.write_str(name)
    }
}

impl FromStr for AssignMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(AssignMode::Merge),
            "append" => Ok(AssignMode::Append),
            "replace" => Ok(AssignMode::Replace),
            other => Err(format!(
                "unknown assign mode '{}' (expected merge, append or replace)",
                other
            )),
        }
    }
}

/// Combine `source` into `target` with the given mode.
///
/// When the two values are not containers of the same kind, `target` is
/// replaced by a copy of `source`. This applies at the root as well: a
/// mismatched `target` is overwritten, never left untouched.
pub fn assign(target: &mut Value, source: &Value, mode: AssignMode) {
    let mut at = ObjectPath::root();
    assign_value(target, source, mode, &mut at);
}

/// Merge `source` into `target`, mutating `target`. `source` is untouched.
///
/// Keys present on both sides are combined recursively or overridden. Arrays
/// are merged by index.
pub fn merge<'t>(target: &'t mut Value, source: &Value) -> &'t mut Value {
    assign(target, source, AssignMode::Merge);
    target
}

/// Merge `source` into `target` in append mode: arrays are concatenated.
pub fn append<'t>(target: &'t mut Value, source: &Value) -> &'t mut Value {
    assign(target, source, AssignMode::Append);
    target
}

/// Merge `source` into `target` in replace mode.
///
/// Keys and set elements that are not in `source` are removed; arrays are
/// truncated when `source` is shorter.
pub fn replace<'t>(target: &'t mut Value, source: &Value) -> &'t mut Value {
    assign(target, source, AssignMode::Replace);
    target
}

/// Update `target` with a partial `source`. An alias of [`merge`].
pub fn update<'t>(target: &'t mut Value, source: &Value) -> &'t mut Value {
    merge(target, source)
}

/// Assign `source` at `path` inside `target`, creating the path if needed.
///
/// Returns the slot that received the source.
///
/// # Errors
///
/// Returns an error if `path` does not parse or cannot be navigated (see
/// [`entry_mut`]).
pub fn assign_at<'t, 'p>(
    target: &'t mut Value,
    path: impl PathSource<'p>,
    source: &Value,
    mode: AssignMode,
) -> Result<&'t mut Value> {
    let keys = path.resolve_path()?;
    let slot = entry_mut(target, keys.as_ref())?;
    let mut at = ObjectPath::from_keys(keys.into_owned());
    assign_value(slot, source, mode, &mut at);
    Ok(slot)
}

fn assign_value(target: &mut Value, source: &Value, mode: AssignMode, at: &mut ObjectPath) {
    match (target, source) {
        (Value::Array(target), Value::Array(source)) => assign_array(target, source, mode, at),
        (Value::Object(target), Value::Object(source)) => {
            assign_object(target, source, mode, at)
        }
        (Value::Map(target), Value::Map(source)) => assign_map(target, source, mode, at),
        (Value::Set(target), Value::Set(source)) => assign_set(target, source, mode),
        (target, source) => overwrite(target, source, at),
    }
}

/// Recurse into an existing slot, or copy the source over it.
fn assign_slot(slot: &mut Value, source: &Value, mode: AssignMode, at: &mut ObjectPath) {
    if classify(slot, source).is_match() {
        assign_value(slot, source, mode, at);
    } else {
        overwrite(slot, source, at);
    }
}

fn overwrite(slot: &mut Value, source: &Value, at: &ObjectPath) {
    if slot.is_container() || source.is_container() {
        debug!(
            "Overwriting value at path '{}': {} -> {}",
            at,
            slot.type_name(),
            source.type_name()
        );
    }
    *slot = source.clone();
}

fn assign_array(target: &mut Vec<Value>, source: &[Value], mode: AssignMode, at: &mut ObjectPath) {
    if mode == AssignMode::Append {
        target.extend(source.iter().cloned());
        return;
    }

    for (i, item) in source.iter().enumerate() {
        match target.get_mut(i) {
            Some(slot) => {
                at.push(PathKey::Index(i));
                assign_slot(slot, item, mode, at);
                at.pop();
            }
            None => target.push(item.clone()),
        }
    }

    if mode == AssignMode::Replace && target.len() > source.len() {
        debug!(
            "Truncating array at path '{}' (old size: {}, new size: {})",
            at,
            target.len(),
            source.len()
        );
        target.truncate(source.len());
    }
}

fn assign_object(target: &mut Record, source: &Record, mode: AssignMode, at: &mut ObjectPath) {
    for (key, item) in source {
        match target.get_mut(key) {
            Some(slot) => {
                at.push(PathKey::Key(key.clone()));
                assign_slot(slot, item, mode, at);
                at.pop();
            }
            None => {
                target.insert(key.clone(), item.clone());
            }
        }
    }

    if mode == AssignMode::Replace {
        target.retain(|key, _| source.contains_key(key));
    }
}

/// Path key used to report a map entry in log messages.
fn map_key(key: &Primitive) -> PathKey {
    let index = match key {
        Primitive::Number(n) => n.as_u64().and_then(|i| usize::try_from(i).ok()),
        _ => None,
    };
    match index {
        Some(i) => PathKey::Index(i),
        None => PathKey::Key(key.to_string()),
    }
}

fn assign_map(target: &mut ValueMap, source: &ValueMap, mode: AssignMode, at: &mut ObjectPath) {
    for (key, item) in source {
        match target.get_mut(key) {
            Some(slot) => {
                at.push(map_key(key));
                assign_slot(slot, item, mode, at);
                at.pop();
            }
            None => {
                target.insert(key.clone(), item.clone());
            }
        }
    }

    if mode == AssignMode::Replace {
        target.retain(|key, _| source.contains_key(key));
    }
}

fn assign_set(target: &mut ValueSet, source: &ValueSet, mode: AssignMode) {
    for item in source {
        if !target.contains(item) {
            target.insert(item.clone());
        }
    }

    if mode == AssignMode::Replace {
        target.retain(|item| source.contains(item));
    }
}
