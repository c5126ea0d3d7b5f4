//! Property-based tests for the path grammar, the matcher and the assign engine.
//!
//! These tests use proptest to generate random paths and value trees and verify
//! that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::matcher::matches;
    use crate::merge::{append, merge, replace};
    use crate::path::{parse, stringify, ObjectPath, PathKey, StringifyOptions};
    use crate::value::{Record, Value};
    use proptest::prelude::*;

    fn concrete_key() -> impl Strategy<Value = PathKey> {
        prop_oneof![
            "[a-z_][a-z0-9_]{0,6}".prop_map(PathKey::Key),
            (0usize..50).prop_map(PathKey::Index),
        ]
    }

    fn concrete_path(max_len: usize) -> impl Strategy<Value = ObjectPath> {
        prop::collection::vec(concrete_key(), 0..max_len).prop_map(ObjectPath::from)
    }

    fn wildcard() -> impl Strategy<Value = PathKey> {
        prop_oneof![Just(PathKey::AnyKey), Just(PathKey::AnyIndex)]
    }

    /// The wildcard that matches `key`.
    fn wildcard_for(key: &PathKey) -> PathKey {
        if key.is_numeric() {
            PathKey::AnyIndex
        } else {
            PathKey::AnyKey
        }
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-100i64..100).prop_map(Value::from),
            "[a-z]{0,5}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|record: Record| Value::Object(record)),
            ]
        })
    }

    // ============================================================================
    // parse / stringify property tests
    // ============================================================================

    proptest! {
        /// Property: parsing a stringified path yields the same keys
        #[test]
        fn stringify_then_parse_round_trips(
            path in concrete_path(6),
            tail in prop::option::of(wildcard()),
        ) {
            let mut path = path;
            if let Some(tail) = tail {
                path.push(tail);
            }
            let text = stringify(&path, &StringifyOptions::default());
            prop_assert_eq!(parse(&text).unwrap(), path);
        }

        /// Property: the round trip also holds without the leading dot
        #[test]
        fn round_trips_without_starting_dot(path in concrete_path(6)) {
            let options = StringifyOptions::default().no_starting_dot(true);
            let text = stringify(&path, &options);
            prop_assert!(!text.starts_with('.'));
            prop_assert_eq!(parse(&text).unwrap(), path);
        }

        /// Property: whitespace anywhere in the text is ignored
        #[test]
        fn whitespace_is_ignored(path in concrete_path(6)) {
            let text = stringify(&path, &StringifyOptions::default());
            let spaced: String = text.chars().flat_map(|c| [c, ' ']).collect();
            prop_assert_eq!(parse(&spaced).unwrap(), path);
        }

        /// Property: parse never panics, it either succeeds or returns an error
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = parse(&input);
        }

        /// Property: the root symbol is a pure prefix
        #[test]
        fn root_symbol_is_prefix(path in concrete_path(6), symbol in "[$@#]{1,2}") {
            let plain = stringify(&path, &StringifyOptions::default());
            let rooted = stringify(&path, &StringifyOptions::default().root_symbol(symbol.clone()));
            prop_assert_eq!(rooted, format!("{}{}", symbol, plain));
        }
    }

    // ============================================================================
    // matcher property tests
    // ============================================================================

    proptest! {
        /// Property: every concrete path matches itself
        #[test]
        fn path_matches_itself(path in concrete_path(8)) {
            prop_assert!(matches(path.keys(), &[path.clone()]));
        }

        /// Property: a trailing wildcard matches every extension of its prefix
        #[test]
        fn trailing_wildcard_matches_extensions(
            prefix in concrete_path(5),
            next in concrete_key(),
            rest in concrete_path(4),
        ) {
            let mut rule = prefix.clone();
            rule.push(wildcard_for(&next));

            let mut subject = prefix;
            subject.push(next);
            subject.extend(rest);
            prop_assert!(matches(subject.keys(), &[rule]));
        }

        /// Property: a rule one wildcard longer than the subject matches it
        #[test]
        fn wildcard_one_past_the_end_matches(path in concrete_path(6), tail in wildcard()) {
            let mut rule = path.clone();
            rule.push(tail);
            prop_assert!(matches(path.keys(), &[rule]));
        }

        /// Property: a wildcard that is not the last key never matches
        #[test]
        fn inner_wildcard_never_matches(
            prefix in concrete_path(4),
            inner in wildcard(),
            suffix in prop::collection::vec(concrete_key(), 1..4),
            subject in concrete_path(8),
        ) {
            let mut rule = prefix;
            rule.push(inner);
            rule.extend(suffix);
            prop_assert!(!matches(subject.keys(), &[rule]));
        }

        /// Property: a rule set matches exactly when one of its rules does
        #[test]
        fn rule_set_is_a_disjunction(
            subject in concrete_path(5),
            rules in prop::collection::vec(concrete_path(5), 0..5),
        ) {
            let any = rules.iter().any(|rule| matches(subject.keys(), std::slice::from_ref(rule)));
            prop_assert_eq!(matches(subject.keys(), &rules), any);
        }
    }

    // ============================================================================
    // assign engine property tests
    // ============================================================================

    proptest! {
        /// Property: merging a value into itself changes nothing
        #[test]
        fn merge_with_self_is_identity(value in json_value()) {
            let mut target = value.clone();
            merge(&mut target, &value);
            prop_assert_eq!(target, value);
        }

        /// Property: replace makes the target structurally equal to the source
        #[test]
        fn replace_yields_source(target in json_value(), source in json_value()) {
            let mut target = target;
            replace(&mut target, &source);
            prop_assert_eq!(target, source);
        }

        /// Property: appending arrays concatenates them
        #[test]
        fn append_concatenates_arrays(
            left in prop::collection::vec(json_value(), 0..4),
            right in prop::collection::vec(json_value(), 0..4),
        ) {
            let mut target = Value::Array(left.clone());
            append(&mut target, &Value::Array(right.clone()));

            let mut expected = left;
            expected.extend(right);
            prop_assert_eq!(target, Value::Array(expected));
        }
    }
}
