//! Matching concrete paths against wildcard rules.
//!
//! A rule is an [`ObjectPath`] whose last key may be a wildcard. `AnyIndex`
//! matches any numeric key and `AnyKey` any text key at that depth, together
//! with everything below it. A rule may also be one wildcard longer than the
//! subject, meaning "this location and anything under it". A wildcard that is
//! not the last key of its rule never matches; such rules are dropped.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::{parse, ObjectPath, PathKey};

/// Returns true if `subject` matches at least one of `rules`.
///
/// Keys compare exactly: a text key never equals a numeric key. Wildcard keys
/// inside `subject` are ordinary keys.
///
/// # Examples
///
/// ```
/// use object_ops::matcher::matches;
/// use object_ops::path::parse;
///
/// let subject = parse("a.b.c").unwrap();
/// assert!(matches(subject.keys(), &[parse("a.*").unwrap()]));
/// assert!(!matches(subject.keys(), &[parse("a.*.c").unwrap()]));
/// ```
pub fn matches(subject: &[PathKey], rules: &[ObjectPath]) -> bool {
    let mut candidates: Vec<&ObjectPath> = rules.iter().collect();

    for (i, key) in subject.iter().enumerate() {
        let mut survivors = Vec::with_capacity(candidates.len());

        for rule in candidates {
            let is_last = rule.len() == i + 1;
            match rule.get(i) {
                Some(PathKey::AnyIndex) if is_last && key.is_numeric() => return true,
                Some(PathKey::AnyKey) if is_last && key.is_text() => return true,
                Some(rule_key) if rule_key.is_wildcard() && !is_last => {
                    trace!("dropping rule '{}': wildcard at {} is not its last key", rule, i);
                }
                Some(rule_key) if rule_key == key => survivors.push(rule),
                _ => {}
            }
        }

        if survivors.is_empty() {
            return false;
        }
        candidates = survivors;
    }

    candidates.iter().any(|rule| {
        rule.len() == subject.len()
            || (rule.len() == subject.len() + 1 && rule.last().is_some_and(PathKey::is_wildcard))
    })
}

/// A disjunctive set of path rules.
///
/// Deserializes from a list of path strings, so it can be read straight out
/// of a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathRuleSet {
    rules: Vec<ObjectPath>,
}

impl PathRuleSet {
    pub fn new(rules: Vec<ObjectPath>) -> Self {
        Self { rules }
    }

    /// Parse every string into a rule, failing on the first invalid one.
    pub fn parse_all<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = texts
            .into_iter()
            .map(|text| parse(text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: ObjectPath) {
        self.rules.push(rule);
    }

    /// Returns true if `subject` matches any rule in the set.
    pub fn matches(&self, subject: &[PathKey]) -> bool {
        matches(subject, &self.rules)
    }

    pub fn rules(&self) -> &[ObjectPath] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectPath> {
        self.rules.iter()
    }
}

impl FromIterator<ObjectPath> for PathRuleSet {
    fn from_iter<I: IntoIterator<Item = ObjectPath>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
