//! Path grammar: parsing path strings into key sequences and rendering them back.
//!
//! Path expressions like `servers[0].host` or `rules[*]` are parsed into an
//! [`ObjectPath`], a sequence of [`PathKey`]s:
//!
//! - Dot notation: `foo.bar.baz`
//! - Array indices: `foo[0]`, `items[1].name`, `grid[1][2]`
//! - Wildcards: `a.*` (any key) and `a[*]` (any index)
//!
//! Whitespace anywhere in the input is ignored. A `.` inside brackets and an
//! unmatched `[` or `]` are errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, PathParseErrorKind, Result};

/// Literal used for both wildcard forms in path text.
pub const WILDCARD: &str = "*";

/// A single key in an object path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathKey {
    /// A named key for accessing record/map members
    Key(String),
    /// A numeric index for accessing array elements
    Index(usize),
    /// Wildcard in text position, written `.*`
    AnyKey,
    /// Wildcard in index position, written `[*]`
    AnyIndex,
}

impl PathKey {
    /// Create a key segment.
    pub fn key(k: impl Into<String>) -> Self {
        PathKey::Key(k.into())
    }

    /// Create an index segment.
    pub fn index(i: usize) -> Self {
        PathKey::Index(i)
    }

    /// True for keys in text position (`Key` and `AnyKey`).
    pub fn is_text(&self) -> bool {
        matches!(self, PathKey::Key(_) | PathKey::AnyKey)
    }

    /// True for keys in numeric position (`Index` and `AnyIndex`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, PathKey::Index(_) | PathKey::AnyIndex)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, PathKey::AnyKey | PathKey::AnyIndex)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Key(k) => write!(f, ".{}", k),
            PathKey::Index(i) => write!(f, "[{}]", i),
            PathKey::AnyKey => write!(f, ".{}", WILDCARD),
            PathKey::AnyIndex => write!(f, "[{}]", WILDCARD),
        }
    }
}

impl From<&str> for PathKey {
    fn from(s: &str) -> Self {
        PathKey::Key(s.to_owned())
    }
}

impl From<String> for PathKey {
    fn from(s: String) -> Self {
        PathKey::Key(s)
    }
}

impl From<usize> for PathKey {
    fn from(i: usize) -> Self {
        PathKey::Index(i)
    }
}

/// Keys serialize as JSON-friendly scalars: text keys as strings, indices as
/// numbers, and the wildcards as `"*"` and `"[*]"`.
impl Serialize for PathKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PathKey::Key(k) => serializer.serialize_str(k),
            PathKey::Index(i) => serializer.serialize_u64(*i as u64),
            PathKey::AnyKey => serializer.serialize_str(WILDCARD),
            PathKey::AnyIndex => serializer.serialize_str("[*]"),
        }
    }
}

/// An ordered sequence of keys addressing a nested location. Empty is the root.
///
/// # Examples
///
/// ```
/// use object_ops::path::{ObjectPath, PathKey};
///
/// let path: ObjectPath = "servers[0].host".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[1], PathKey::Index(0));
/// assert_eq!(path.to_string(), ".servers[0].host");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectPath(Vec<PathKey>);

impl ObjectPath {
    /// Create an empty path (root).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_keys(keys: Vec<PathKey>) -> Self {
        Self(keys)
    }

    /// Append a key segment and return self (builder pattern).
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(PathKey::Key(k.into()));
        self
    }

    /// Append an index segment and return self (builder pattern).
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(PathKey::Index(i));
        self
    }

    /// Append a wildcard in text position.
    pub fn any_key(mut self) -> Self {
        self.0.push(PathKey::AnyKey);
        self
    }

    /// Append a wildcard in index position.
    pub fn any_index(mut self) -> Self {
        self.0.push(PathKey::AnyIndex);
        self
    }

    pub fn push(&mut self, key: PathKey) {
        self.0.push(key);
    }

    pub fn pop(&mut self) -> Option<PathKey> {
        self.0.pop()
    }

    pub fn keys(&self) -> &[PathKey] {
        &self.0
    }

    pub fn into_keys(self) -> Vec<PathKey> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathKey> {
        self.0.last()
    }

    pub fn get(&self, i: usize) -> Option<&PathKey> {
        self.0.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathKey> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for ObjectPath {
    type Output = PathKey;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl std::ops::Deref for ObjectPath {
    type Target = [PathKey];

    fn deref(&self) -> &[PathKey] {
        &self.0
    }
}

impl AsRef<[PathKey]> for ObjectPath {
    fn as_ref(&self) -> &[PathKey] {
        &self.0
    }
}

impl From<Vec<PathKey>> for ObjectPath {
    fn from(keys: Vec<PathKey>) -> Self {
        Self(keys)
    }
}

impl FromIterator<PathKey> for ObjectPath {
    fn from_iter<I: IntoIterator<Item = PathKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PathKey> for ObjectPath {
    fn extend<I: IntoIterator<Item = PathKey>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ObjectPath {
    type Item = PathKey;
    type IntoIter = std::vec::IntoIter<PathKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectPath {
    type Item = &'a PathKey;
    type IntoIter = std::slice::Iter<'a, PathKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Serializes as path text, e.g. `".a.b[0]"`.
impl Serialize for ObjectPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectPath {
    /// Deserializes from path text, e.g. `"a.b[0]"`.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}

fn flush_label(token: &mut String, path: &mut Vec<PathKey>) {
    if token.is_empty() {
        return;
    }
    if token.as_str() == WILDCARD {
        path.push(PathKey::AnyKey);
        token.clear();
    } else {
        path.push(PathKey::Key(std::mem::take(token)));
    }
}

fn flush_index(token: &mut String, path: &mut Vec<PathKey>, position: usize) -> Result<()> {
    if token.is_empty() {
        return Ok(());
    }
    if token.as_str() == WILDCARD {
        path.push(PathKey::AnyIndex);
    } else {
        let index = token.parse::<usize>().map_err(|_| {
            Error::path_parse(PathParseErrorKind::InvalidIndex(token.clone()), position)
        })?;
        path.push(PathKey::Index(index));
    }
    token.clear();
    Ok(())
}

/// Parse a path string into an [`ObjectPath`].
///
/// # Errors
///
/// Returns `Error::PathParse` for a `.` inside brackets, a `]` without `[`,
/// an unterminated `[`, or bracket content that is not `*` or an index.
///
/// # Examples
///
/// ```
/// use object_ops::path::{parse, PathKey};
///
/// let path = parse("a.b[0].c").unwrap();
/// assert_eq!(
///     path.keys(),
///     &[PathKey::key("a"), PathKey::key("b"), PathKey::Index(0), PathKey::key("c")]
/// );
/// assert!(parse("a[.b]").is_err());
/// ```
pub fn parse(text: &str) -> Result<ObjectPath> {
    let mut path = Vec::new();
    let mut token = String::new();
    let mut bracket = false;
    let mut consumed = 0;

    for (position, ch) in text.chars().enumerate() {
        consumed = position + 1;
        if ch.is_whitespace() {
            continue;
        }

        match ch {
            '[' => {
                flush_label(&mut token, &mut path);
                bracket = true;
            }
            ']' => {
                if !bracket {
                    return Err(Error::path_parse(
                        PathParseErrorKind::UnexpectedBracketClose,
                        position,
                    ));
                }
                bracket = false;
                flush_index(&mut token, &mut path, position)?;
            }
            '.' => {
                if bracket {
                    return Err(Error::path_parse(
                        PathParseErrorKind::DotInsideBrackets,
                        position,
                    ));
                }
                flush_label(&mut token, &mut path);
            }
            _ => token.push(ch),
        }
    }

    if bracket {
        return Err(Error::path_parse(
            PathParseErrorKind::UnterminatedBracket,
            consumed,
        ));
    }
    flush_label(&mut token, &mut path);

    Ok(ObjectPath(path))
}

/// Options for [`stringify`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StringifyOptions {
    /// Prefix written before the first key, e.g. `$`.
    pub root_symbol: String,
    /// Strip a single leading `.` from the result.
    pub no_starting_dot: bool,
}

impl StringifyOptions {
    pub fn root_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.root_symbol = symbol.into();
        self
    }

    pub fn no_starting_dot(mut self, yes: bool) -> Self {
        self.no_starting_dot = yes;
        self
    }
}

/// Render a key sequence back to path text.
///
/// ```
/// use object_ops::path::{parse, stringify, StringifyOptions};
///
/// let path = parse("foo[1].bar").unwrap();
/// assert_eq!(stringify(&path, &StringifyOptions::default()), ".foo[1].bar");
/// assert_eq!(
///     stringify(&path, &StringifyOptions::default().root_symbol("$")),
///     "$.foo[1].bar"
/// );
/// ```
pub fn stringify(path: &[PathKey], options: &StringifyOptions) -> String {
    let mut result = options.root_symbol.clone();
    for key in path {
        result.push_str(&key.to_string());
    }

    if options.no_starting_dot && result.starts_with('.') {
        result.remove(0);
    }

    result
}
