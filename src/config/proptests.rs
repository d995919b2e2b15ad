//! Property-based tests for hardening and environment resolution.

use super::harden::harden;
use super::resolver::resolve_for_environment;
use crate::environment::{classify, HostPatterns};
use crate::produce::DEFAULT_SUFFIX;
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

// Lower-case keys can never end with the upper-case marker suffix.
fn unmarked_document_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..6).prop_map(|entries| {
                Value::Mapping(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::String(k), v))
                        .collect(),
                )
            }),
        ]
    })
}

fn int_mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::vec(("[a-d]", any::<i32>()), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (Value::String(k), Value::Number(v.into())))
            .collect()
    })
}

proptest! {
    // Documents without marked keys come back unchanged for any environment
    #[test]
    fn harden_is_identity_without_markers(
        doc in unmarked_document_strategy(),
        env in prop::option::of("[a-z]{1,6}")
    ) {
        prop_assert_eq!(harden(&doc, DEFAULT_SUFFIX, env.as_deref()), doc);
    }

    // Overlay keeps every default-only key and takes every environment key
    #[test]
    fn resolver_overlay_keeps_default_only_keys(
        default in int_mapping_strategy(),
        specific in int_mapping_strategy()
    ) {
        let mut map = Mapping::new();
        map.insert(Value::from("default"), Value::Mapping(default.clone()));
        map.insert(Value::from("prod"), Value::Mapping(specific.clone()));

        let resolved = resolve_for_environment(&Value::Mapping(map), Some("prod"));
        let Some(Value::Mapping(merged)) = resolved else {
            return Err(TestCaseError::fail("expected a mapping"));
        };

        for (key, value) in &specific {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &default {
            if !specific.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        let expected_len = default.keys().filter(|k| !specific.contains_key(*k)).count()
            + specific.len();
        prop_assert_eq!(merged.len(), expected_len);
    }

    // Non-mapping values always replace the default
    #[test]
    fn resolver_scalar_replaces_default(
        default in scalar_strategy(),
        specific in scalar_strategy()
    ) {
        let mut map = Mapping::new();
        map.insert(Value::from("default"), default.clone());
        map.insert(Value::from("dev"), specific.clone());
        let map = Value::Mapping(map);

        prop_assert_eq!(resolve_for_environment(&map, Some("dev")), Some(specific));
        prop_assert_eq!(resolve_for_environment(&map, Some("prod")), Some(default));
    }

    // Classification returns the first declared environment whose literal
    // fragment occurs in the hostname
    #[test]
    fn classifier_picks_first_declared_match(
        hostname in "[a-z]{1,10}",
        fragments in prop::collection::vec("[a-z]{1,3}", 1..8)
    ) {
        let hosts: HostPatterns = fragments
            .iter()
            .enumerate()
            .map(|(i, fragment)| (format!("env{i}"), regex::escape(fragment)))
            .collect();

        let expected = fragments
            .iter()
            .position(|fragment| hostname.contains(fragment.as_str()))
            .map(|i| format!("env{i}"));

        prop_assert_eq!(classify(Some(hostname.as_str()), Some(&hosts)).unwrap(), expected);
    }
}
