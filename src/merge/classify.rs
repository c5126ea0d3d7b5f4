//! Structural classification of value pairs.

use crate::value::Value;

/// Which structural category two values share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    BothArray,
    BothObject,
    BothMap,
    BothSet,
    /// Different categories, or at least one scalar.
    NoMatch,
}

impl Classification {
    /// True when the pair can be combined recursively.
    pub fn is_match(self) -> bool {
        self != Classification::NoMatch
    }
}

/// Classify a (target, source) pair for the assign engine.
///
/// Only two containers of the same kind match; scalars never do, even when
/// both sides are the same scalar type.
pub fn classify(a: &Value, b: &Value) -> Classification {
    match (a, b) {
        (Value::Map(_), Value::Map(_)) => Classification::BothMap,
        (Value::Set(_), Value::Set(_)) => Classification::BothSet,
        (Value::Array(_), Value::Array(_)) => Classification::BothArray,
        (Value::Object(_), Value::Object(_)) => Classification::BothObject,
        _ => Classification::NoMatch,
    }
}
