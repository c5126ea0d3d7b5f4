//! In-memory value model shared by the path resolver and the assign engine.
//!
//! `Value` is a closed set of variants. Containers come in four structural
//! kinds (array, object, map, set) which the assign engine classifies and
//! combines. Map keys and set elements are [`Primitive`]s compared by value,
//! so membership never depends on identity and copying a set can never alias
//! the source.
//!
//! Conversions from and to `serde_json::Value` and `serde_yaml::Value` are
//! provided so documents can be loaded, combined and written back.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// String-keyed record (a plain object).
pub type Record = BTreeMap<String, Value>;

/// Key-value map with primitive keys.
pub type ValueMap = BTreeMap<Primitive, Value>;

/// Set of primitive values.
pub type ValueSet = BTreeSet<Primitive>;

/// A JSON/YAML number.
///
/// Integers are kept exactly as read, so a document that passes through the
/// assign engine is written back with the same digits. Numbers compare by
/// value across variants (`1 == 1.0`), with `0.0 == -0.0` and every NaN equal
/// to every other NaN, which makes `Number` a lawful `Eq + Ord + Hash` type.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

fn canonical(n: f64) -> f64 {
    if n.is_nan() {
        f64::NAN
    } else if n == 0.0 {
        0.0
    } else {
        n
    }
}

/// 2^64, the first float above every `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::PosInt(u) => u as f64,
            Number::NegInt(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// The value as a non-negative integer, if it is one.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::PosInt(u) => Some(u),
            Number::NegInt(_) => None,
            Number::Float(f) if f >= 0.0 && f.fract() == 0.0 && f < U64_LIMIT => Some(f as u64),
            Number::Float(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::PosInt(u) => i64::try_from(u).ok(),
            Number::NegInt(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, Number::Float(_))
    }

    /// Exact integral value, used to compare integers with integral floats
    /// without going through a lossy `f64`.
    fn integral(&self) -> Option<i128> {
        match *self {
            Number::PosInt(u) => Some(i128::from(u)),
            Number::NegInt(i) => Some(i128::from(i)),
            Number::Float(f) if f.fract() == 0.0 && f.abs() < 1e38 => Some(f as i128),
            Number::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.integral(), other.integral()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => canonical(self.as_f64()).total_cmp(&canonical(other.as_f64())),
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.integral() {
            Some(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            None => {
                1u8.hash(state);
                canonical(self.as_f64()).to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::PosInt(u) => write!(f, "{}", u),
            Number::NegInt(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<u64> for Number {
    fn from(u: u64) -> Self {
        Number::PosInt(u)
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        if i < 0 {
            Number::NegInt(i)
        } else {
            Number::PosInt(i as u64)
        }
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Number::NegInt(i)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<&serde_yaml::Number> for Number {
    fn from(n: &serde_yaml::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Number::NegInt(i)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<Number> for serde_yaml::Number {
    fn from(n: Number) -> Self {
        match n {
            Number::PosInt(u) => u.into(),
            Number::NegInt(i) => i.into(),
            Number::Float(f) => f.into(),
        }
    }
}

/// A scalar usable as a map key or set element.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Primitive {
    /// Returns the string content if this is a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Null => write!(f, "null"),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Number(n) => write!(f, "{}", n),
            Primitive::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::String(s.to_owned())
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Primitive::String(s)
    }
}

impl From<f64> for Primitive {
    fn from(n: f64) -> Self {
        Primitive::Number(n.into())
    }
}

impl From<i64> for Primitive {
    fn from(n: i64) -> Self {
        Primitive::Number(n.into())
    }
}

impl From<u64> for Primitive {
    fn from(n: u64) -> Self {
        Primitive::Number(n.into())
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Primitive::Bool(b)
    }
}

/// A dynamically shaped value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Plain record with string keys.
    Object(Record),
    /// Key-value map with primitive keys.
    Map(ValueMap),
    /// Set of primitive values.
    Set(ValueSet),
}

impl Value {
    /// Short lowercase name of the variant, used in log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for arrays, objects, maps and sets.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Object(_) | Value::Map(_) | Value::Set(_)
        )
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// The scalar content of this value, or `None` for containers.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Value::Null => Some(Primitive::Null),
            Value::Bool(b) => Some(Primitive::Bool(*b)),
            Value::Number(n) => Some(Primitive::Number(*n)),
            Value::String(s) => Some(Primitive::String(s.clone())),
            _ => None,
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        match p {
            Primitive::Null => Value::Null,
            Primitive::Bool(b) => Value::Bool(b),
            Primitive::Number(n) => Value::Number(n),
            Primitive::String(s) => Value::String(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::Set(set)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

// JSON conversions

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as JsonValue;

        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(Number::from(&n)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// NaN and the infinities have no JSON form and render as null.
fn json_number(n: Number) -> serde_json::Value {
    match n {
        Number::PosInt(u) => serde_json::Value::Number(u.into()),
        Number::NegInt(i) => serde_json::Value::Number(i.into()),
        Number::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}

impl From<&Value> for serde_json::Value {
    /// Maps become objects with stringified keys and sets become arrays.
    fn from(value: &Value) -> Self {
        use serde_json::Value as JsonValue;

        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            Value::Object(record) => JsonValue::Object(
                record
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from(v)))
                    .collect(),
            ),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.to_string(), JsonValue::from(v)))
                    .collect(),
            ),
            Value::Set(set) => JsonValue::Array(
                set.iter()
                    .map(|p| JsonValue::from(&Value::from(p.clone())))
                    .collect(),
            ),
        }
    }
}

// YAML conversions

fn is_set_tag(tag: &serde_yaml::value::Tag) -> bool {
    let tag = tag.to_string();
    tag.trim_start_matches('!').rsplit(':').next() == Some("set")
}

fn yaml_key(key: serde_yaml::Value) -> Primitive {
    use serde_yaml::Value as YamlValue;

    match key {
        YamlValue::Null => Primitive::Null,
        YamlValue::Bool(b) => Primitive::Bool(b),
        YamlValue::Number(n) => Primitive::Number(Number::from(&n)),
        YamlValue::String(s) => Primitive::String(s),
        other => Primitive::String(
            serde_yaml::to_string(&other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        ),
    }
}

impl From<serde_yaml::Value> for Value {
    /// Mappings whose keys are all strings become objects; any other mapping
    /// becomes a map. A mapping tagged `!set` becomes a set of its keys.
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value as YamlValue;

        match value {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(b),
            YamlValue::Number(n) => Value::Number(Number::from(&n)),
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            YamlValue::Mapping(mapping) => {
                if mapping.iter().all(|(k, _)| k.is_string()) {
                    Value::Object(
                        mapping
                            .into_iter()
                            .filter_map(|(k, v)| match k {
                                YamlValue::String(k) => Some((k, Value::from(v))),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    Value::Map(
                        mapping
                            .into_iter()
                            .map(|(k, v)| (yaml_key(k), Value::from(v)))
                            .collect(),
                    )
                }
            }
            YamlValue::Tagged(tagged) => {
                let tagged = *tagged;
                match tagged.value {
                    YamlValue::Mapping(mapping) if is_set_tag(&tagged.tag) => {
                        Value::Set(mapping.into_iter().map(|(k, _)| yaml_key(k)).collect())
                    }
                    inner => Value::from(inner),
                }
            }
        }
    }
}

fn yaml_primitive(p: &Primitive) -> serde_yaml::Value {
    match p {
        Primitive::Null => serde_yaml::Value::Null,
        Primitive::Bool(b) => serde_yaml::Value::Bool(*b),
        Primitive::Number(n) => serde_yaml::Value::Number((*n).into()),
        Primitive::String(s) => serde_yaml::Value::String(s.clone()),
    }
}

impl From<&Value> for serde_yaml::Value {
    fn from(value: &Value) -> Self {
        use serde_yaml::value::{Tag, TaggedValue};
        use serde_yaml::{Mapping, Value as YamlValue};

        match value {
            Value::Null => YamlValue::Null,
            Value::Bool(b) => YamlValue::Bool(*b),
            Value::Number(n) => YamlValue::Number((*n).into()),
            Value::String(s) => YamlValue::String(s.clone()),
            Value::Array(items) => YamlValue::Sequence(items.iter().map(YamlValue::from).collect()),
            Value::Object(record) => YamlValue::Mapping(
                record
                    .iter()
                    .map(|(k, v)| (YamlValue::String(k.clone()), YamlValue::from(v)))
                    .collect::<Mapping>(),
            ),
            Value::Map(map) => YamlValue::Mapping(
                map.iter()
                    .map(|(k, v)| (yaml_primitive(k), YamlValue::from(v)))
                    .collect::<Mapping>(),
            ),
            Value::Set(set) => YamlValue::Tagged(Box::new(TaggedValue {
                tag: Tag::new("set"),
                value: YamlValue::Mapping(
                    set.iter()
                        .map(|p| (yaml_primitive(p), YamlValue::Null))
                        .collect::<Mapping>(),
                ),
            })),
        }
    }
}
