//! Integration tests for the public library API.
//!
//! These tests exercise the modules together the way a caller would: paths
//! parsed from text feed the matcher, the resolver and the assign engine.

use object_ops::error::{Error, PathParseErrorKind};
use object_ops::matcher::{matches, PathRuleSet};
use object_ops::merge::{append, assign_at, merge, replace, AssignMode};
use object_ops::path::{parse, stringify, ObjectPath, PathKey, StringifyOptions};
use object_ops::resolve::{bound, deferred, entry_mut, get, GetOptions};
use object_ops::value::{Primitive, Value, ValueSet};
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn p(text: &str) -> ObjectPath {
    parse(text).unwrap()
}

#[test]
fn test_path_grammar_examples() {
    assert_eq!(p("a.b.c"), ObjectPath::root().key("a").key("b").key("c"));
    assert_eq!(p("a[0]"), ObjectPath::root().key("a").index(0));
    assert_eq!(p("a[*]"), ObjectPath::root().key("a").any_index());
    assert_eq!(
        p("a.b[0].c"),
        ObjectPath::root().key("a").key("b").index(0).key("c")
    );
    assert_eq!(p("foo[1][2]"), ObjectPath::root().key("foo").index(1).index(2));
    assert_eq!(p(" a . b [ 0 ] "), p("a.b[0]"));
}

#[test]
fn test_path_grammar_errors() {
    let kinds = [
        ("a[.b]", PathParseErrorKind::DotInsideBrackets),
        ("a]", PathParseErrorKind::UnexpectedBracketClose),
        ("a[0", PathParseErrorKind::UnterminatedBracket),
        ("a[x]", PathParseErrorKind::InvalidIndex("x".to_string())),
    ];
    for (text, expected) in kinds {
        let err = parse(text).unwrap_err();
        assert_eq!(err.path_parse_kind(), Some(&expected), "parsing {}", text);
    }
}

#[test]
fn test_stringify_parse_round_trip() {
    for text in ["a.b.c", "a[0]", "a[*]", "a.b[0].c", "foo[1][2]", "x.*"] {
        let path = p(text);
        let rendered = stringify(&path, &StringifyOptions::default());
        assert_eq!(parse(&rendered).unwrap(), path, "round trip of {}", text);
    }
}

#[test]
fn test_matcher_examples() {
    let subject = p("a.b.c");
    assert!(!matches(subject.keys(), &[p("a.*.c")]));
    assert!(matches(subject.keys(), &[p("a.b.c")]));
    assert!(matches(subject.keys(), &[p("a.*")]));

    let numeric = ObjectPath::root().index(1).index(2);
    assert!(matches(numeric.keys(), &[ObjectPath::root().index(1).index(2).any_index()]));
}

#[test]
fn test_matcher_disjunction() {
    let rules = PathRuleSet::parse_all(["a.b", "c.*"]).unwrap();
    assert!(!rules.matches(p("x.y").keys()));
    assert!(rules.matches(p("c.d").keys()));
}

#[test]
fn test_matcher_text_and_numeric_keys_differ() {
    let subject = ObjectPath::root().key("list").key("0");
    assert!(!matches(subject.keys(), &[p("list[0]")]));
    assert!(!matches(subject.keys(), &[p("list[*]")]));
    assert!(matches(subject.keys(), &[p("list.*")]));
}

#[test]
fn test_merge_example() {
    let mut target = v(json!({"a": 1, "b": {"c": 2}}));
    merge(&mut target, &v(json!({"b": {"d": 3}, "e": 4})));
    assert_eq!(target, v(json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4})));
}

#[test]
fn test_append_and_replace_examples() {
    let mut list = v(json!([1, 2]));
    append(&mut list, &v(json!([3, 4])));
    assert_eq!(list, v(json!([1, 2, 3, 4])));

    let mut list = v(json!([1, 2, 3]));
    replace(&mut list, &v(json!([4])));
    assert_eq!(list, v(json!([4])));
}

#[test]
fn test_source_is_never_shared() {
    let source = v(json!({"nested": {"list": [1]}}));
    let mut target = Value::Null;
    merge(&mut target, &source);

    merge(&mut target, &v(json!({"nested": {"list": [9, 9]}})));
    assert_eq!(source, v(json!({"nested": {"list": [1]}})));
}

#[test]
fn test_sets_merge_and_replace() {
    let set = |items: &[&str]| -> Value {
        Value::Set(items.iter().map(|s| Primitive::from(*s)).collect::<ValueSet>())
    };

    let mut target = set(&["a", "b"]);
    merge(&mut target, &set(&["c"]));
    assert_eq!(target, set(&["a", "b", "c"]));

    replace(&mut target, &set(&["b", "d"]));
    assert_eq!(target, set(&["b", "d"]));
}

#[test]
fn test_get_examples() {
    let obj = v(json!({"a": {"b": {"c": 42}}}));
    let fallback = Value::from("d");
    assert_eq!(
        get(&obj, "a.b.x", &GetOptions::default().fallback(&fallback)).unwrap(),
        Some(&fallback)
    );

    let null = Value::Null;
    assert_eq!(
        get(&obj, "a.b.d[5]", &GetOptions::default().fallback(&null)).unwrap(),
        Some(&Value::Null)
    );
    assert_eq!(get(&obj, "a.b.d[5]", &GetOptions::default()).unwrap(), None);
}

#[test]
fn test_get_with_all_path_sources() {
    let obj = v(json!({"a": [10, 20]}));
    let expected = Some(&Value::from(20.0));
    let options = GetOptions::default();
    let path = p("a[1]");

    assert_eq!(get(&obj, "a[1]", &options).unwrap(), expected);
    assert_eq!(get(&obj, &path, &options).unwrap(), expected);
    assert_eq!(get(&obj, path.keys(), &options).unwrap(), expected);
    assert_eq!(get(&obj, path.clone(), &options).unwrap(), expected);
    assert_eq!(get(&obj, deferred(|| path.clone()), &options).unwrap(), expected);
    assert_eq!(bound(&obj).get("a[1]", &options).unwrap(), expected);
}

#[test]
fn test_get_invalid_path_is_error() {
    let obj = v(json!({}));
    assert!(matches!(
        get(&obj, "a[", &GetOptions::default()),
        Err(Error::PathParse { .. })
    ));
}

#[test]
fn test_assign_at_then_get() {
    let mut doc = v(json!({"spec": {"items": []}}));
    assign_at(
        &mut doc,
        "spec.items[0].labels",
        &v(json!({"tier": "web"})),
        AssignMode::Merge,
    )
    .unwrap();
    assign_at(
        &mut doc,
        "spec.items[0].labels",
        &v(json!({"zone": "a"})),
        AssignMode::Merge,
    )
    .unwrap();

    assert_eq!(
        get(&doc, "spec.items[0].labels", &GetOptions::default()).unwrap(),
        Some(&v(json!({"tier": "web", "zone": "a"})))
    );
}

#[test]
fn test_entry_mut_rejects_wildcards_and_scalars() {
    let mut doc = v(json!({"name": "x"}));
    let err = entry_mut(&mut doc, "name.first").unwrap_err();
    assert!(matches!(err, Error::Navigate { .. }));

    let err = entry_mut(&mut doc, vec![PathKey::AnyKey]).unwrap_err();
    assert!(err.to_string().contains("wildcards cannot be navigated"));
}
