//! Path resolution against a [`Value`].
//!
//! [`get`] walks a path read-only and never fails on shape: missing keys,
//! out-of-range indices and keys into scalars all resolve to the caller's
//! fallback. The only error is a path string that does not parse.
//!
//! [`entry_mut`] walks a path mutably, creating intermediate containers, and
//! is what merging at a location inside a document builds on.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::path::{parse, stringify, ObjectPath, PathKey, StringifyOptions, WILDCARD};
use crate::value::{Primitive, Record, Value};

/// Anything a path can be taken from: parsed keys, path text, or a deferred
/// supplier of either.
pub trait PathSource<'p> {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>>;
}

impl<'p> PathSource<'p> for &'p ObjectPath {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        Ok(Cow::Borrowed(self.keys()))
    }
}

impl<'p> PathSource<'p> for &'p [PathKey] {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'p> PathSource<'p> for ObjectPath {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        Ok(Cow::Owned(self.into_keys()))
    }
}

impl<'p> PathSource<'p> for Vec<PathKey> {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        Ok(Cow::Owned(self))
    }
}

impl<'p> PathSource<'p> for &str {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        Ok(Cow::Owned(parse(self)?.into_keys()))
    }
}

impl<'p> PathSource<'p> for &String {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        self.as_str().resolve_path()
    }
}

impl<'p> PathSource<'p> for String {
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        self.as_str().resolve_path()
    }
}

/// A path computed on demand. The supplier runs once, when the path is needed.
pub struct Deferred<F>(F);

/// Wrap a supplier returning any [`PathSource`].
///
/// ```
/// use object_ops::resolve::{deferred, get, GetOptions};
/// use object_ops::value::Value;
///
/// let root = Value::from(serde_json::json!({"a": {"b": 1}}));
/// let found = get(&root, deferred(|| "a.b"), &GetOptions::default()).unwrap();
/// assert_eq!(found, Some(&Value::from(1.0)));
/// ```
pub fn deferred<F>(supplier: F) -> Deferred<F> {
    Deferred(supplier)
}

impl<'p, F, P> PathSource<'p> for Deferred<F>
where
    F: FnOnce() -> P,
    P: PathSource<'p>,
{
    fn resolve_path(self) -> Result<Cow<'p, [PathKey]>> {
        (self.0)().resolve_path()
    }
}

/// Options for [`get`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GetOptions<'v> {
    /// Returned when the path is missing or resolves to null.
    pub fallback: Option<&'v Value>,
    /// First key of the path to walk.
    pub start: usize,
    /// One past the last key to walk; `None` walks to the end.
    pub end: Option<usize>,
}

impl<'v> GetOptions<'v> {
    pub fn fallback(mut self, fallback: &'v Value) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }
}

/// Look up the direct child of `value` addressed by `key`.
pub fn child<'v>(value: &'v Value, key: &PathKey) -> Option<&'v Value> {
    match (value, key) {
        (Value::Object(record), PathKey::Key(k)) => record.get(k),
        (Value::Object(record), PathKey::Index(i)) => record.get(&i.to_string()),
        (Value::Object(record), PathKey::AnyKey) => record.get(WILDCARD),
        (Value::Map(map), PathKey::Key(k)) => map.get(&Primitive::String(k.clone())),
        (Value::Map(map), PathKey::Index(i)) => map.get(&Primitive::from(*i as u64)),
        (Value::Map(map), PathKey::AnyKey) => map.get(&Primitive::from(WILDCARD)),
        (Value::Array(items), PathKey::Index(i)) => items.get(*i),
        (Value::Array(items), PathKey::Key(k)) => {
            k.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        _ => None,
    }
}

/// Resolve `path` inside `root`.
///
/// Returns the fallback when an intermediate value is missing or null, when a
/// key cannot index the value it is applied to, or when the final value is
/// null. Defined values such as `0`, `false` and `""` are returned as-is.
///
/// # Errors
///
/// Only path text that fails to parse is an error.
///
/// # Examples
///
/// ```
/// use object_ops::resolve::{get, GetOptions};
/// use object_ops::value::Value;
///
/// let root = Value::from(serde_json::json!({"a": {"b": {"c": 42}}}));
/// let default = Value::from("d");
///
/// assert_eq!(
///     get(&root, "a.b.c", &GetOptions::default()).unwrap(),
///     Some(&Value::from(42.0))
/// );
/// assert_eq!(
///     get(&root, "a.b.x", &GetOptions::default().fallback(&default)).unwrap(),
///     Some(&default)
/// );
/// ```
pub fn get<'v, 'p>(
    root: &'v Value,
    path: impl PathSource<'p>,
    options: &GetOptions<'v>,
) -> Result<Option<&'v Value>> {
    let keys = path.resolve_path()?;
    let end = options.end.unwrap_or(keys.len()).min(keys.len());
    let start = options.start.min(end);

    let mut current = Some(root);
    for key in &keys[start..end] {
        current = match current {
            Some(value) if !value.is_null() => child(value, key),
            _ => return Ok(options.fallback),
        };
    }

    Ok(match current {
        None => options.fallback,
        Some(Value::Null) => options.fallback.or(current),
        found => found,
    })
}

/// A resolver bound to a root value.
#[derive(Clone, Copy, Debug)]
pub struct Bound<'v> {
    root: &'v Value,
}

/// Bind `root` so paths can be resolved against it repeatedly.
///
/// ```
/// use object_ops::resolve::{bound, GetOptions};
/// use object_ops::value::Value;
///
/// let root = Value::from(serde_json::json!({"a": {"b": {"c": 42}}}));
/// let doc = bound(&root);
/// assert_eq!(
///     doc.get("a.b.c", &GetOptions::default()).unwrap(),
///     Some(&Value::from(42.0))
/// );
/// ```
pub fn bound(root: &Value) -> Bound<'_> {
    Bound { root }
}

impl<'v> Bound<'v> {
    pub fn root(&self) -> &'v Value {
        self.root
    }

    /// Same as [`get`] with the bound root.
    pub fn get<'p>(
        &self,
        path: impl PathSource<'p>,
        options: &GetOptions<'v>,
    ) -> Result<Option<&'v Value>> {
        get(self.root, path, options)
    }
}

/// Most null slots `entry_mut` will add to reach an index past the end of an array.
pub const MAX_ARRAY_PADDING: usize = 65_536;

fn navigate_error(walked: &[PathKey], found: &Value, key: &PathKey) -> Error {
    let message = if key.is_wildcard() {
        "wildcards cannot be navigated".to_string()
    } else {
        format!("cannot apply '{}' to {}", key, found.type_name())
    };
    Error::Navigate {
        path: stringify(walked, &StringifyOptions::default()),
        message,
    }
}

/// Navigate to `path` inside `root`, creating intermediate structures as
/// needed, and return the slot found there.
///
/// Null values on the way are replaced by an empty object (for text keys) or
/// an empty array (for indices); missing record/map entries are inserted as
/// null and arrays are padded with null up to the index, by at most
/// [`MAX_ARRAY_PADDING`] entries.
///
/// # Errors
///
/// Returns `Error::Navigate` for wildcard keys and for keys that cannot apply
/// to the value found (e.g. a key into a string or an index into a set), and
/// for indices too far past the end of an array.
pub fn entry_mut<'v, 'p>(root: &'v mut Value, path: impl PathSource<'p>) -> Result<&'v mut Value> {
    let keys = path.resolve_path()?;
    let mut current = root;

    for (depth, key) in keys.iter().enumerate() {
        if current.is_null() {
            *current = match key {
                PathKey::Index(_) => Value::Array(Vec::new()),
                _ => Value::Object(Record::new()),
            };
        }

        current = match (current, key) {
            (Value::Object(record), PathKey::Key(k)) => record.entry(k.clone()).or_default(),
            (Value::Object(record), PathKey::Index(i)) => record.entry(i.to_string()).or_default(),
            (Value::Map(map), PathKey::Key(k)) => {
                map.entry(Primitive::String(k.clone())).or_default()
            }
            (Value::Map(map), PathKey::Index(i)) => {
                map.entry(Primitive::from(*i as u64)).or_default()
            }
            (Value::Array(items), PathKey::Index(i)) => {
                if items.len() <= *i {
                    let new_len = i
                        .checked_add(1)
                        .filter(|len| len - items.len() <= MAX_ARRAY_PADDING)
                        .ok_or_else(|| Error::Navigate {
                            path: stringify(&keys[..=depth], &StringifyOptions::default()),
                            message: format!(
                                "index {} is more than {} past the end of an array of length {}",
                                i,
                                MAX_ARRAY_PADDING,
                                items.len()
                            ),
                        })?;
                    items.resize(new_len, Value::Null);
                }
                &mut items[*i]
            }
            (other, key) => return Err(navigate_error(&keys[..=depth], other, key)),
        };
    }

    Ok(current)
}
