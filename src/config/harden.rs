//! Document hardening.
//!
//! Hardening collapses every environment value map in a document into the
//! single value for one environment. A mapping key ending in the marker
//! suffix flags its value as an environment value map:
//!
//! ```yaml
//! db_CONFIGURATOR:
//!   default: {host: localhost}
//!   production: {host: db.prod}
//! ```
//!
//! hardened for `production` becomes `db: {host: db.prod}`.
//!
//! # Traversal Rules
//!
//! - Mappings and sequences are rebuilt at every level; the input is never
//!   modified
//! - Only string keys are checked for the suffix, by exact trailing match
//! - A resolved value is written as-is: marked keys inside it are left
//!   untouched
//! - Hardening is not idempotent when resolved values still contain marked
//!   keys, since a second pass would resolve those too

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use super::resolver::resolve_for_environment;

/// Harden a document for one environment.
///
/// Marked keys are renamed by removing the suffix and their values are
/// replaced by [`resolve_for_environment`]. A map that resolves to nothing
/// becomes `null`. Everything else is copied, recursing into mappings,
/// sequences and tagged values.
///
/// An empty suffix marks nothing. A tag on a marked value is dropped and the
/// value under it is resolved.
///
/// # Example
///
/// ```
/// use configurator::config::harden;
/// use serde_yaml::Value;
///
/// let doc: Value = serde_yaml::from_str(
///     "name: api\nport_CONFIGURATOR: {default: 8080, prod: 80}",
/// )
/// .unwrap();
///
/// let hardened = harden(&doc, "_CONFIGURATOR", Some("prod"));
/// assert_eq!(hardened["port"], 80);
/// assert_eq!(hardened["name"], "api");
/// ```
pub fn harden(document: &Value, suffix: &str, environment: Option<&str>) -> Value {
    match document {
        Value::Null => Value::Null,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => document.clone(),
        Value::Sequence(items) => Value::Sequence(
            items
                .iter()
                .map(|item| harden(item, suffix, environment))
                .collect(),
        ),
        Value::Mapping(entries) => Value::Mapping(harden_mapping(entries, suffix, environment)),
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: harden(&tagged.value, suffix, environment),
        })),
    }
}

/// [`harden`] over an optional document; absence passes through.
pub fn harden_optional(
    document: Option<&Value>,
    suffix: &str,
    environment: Option<&str>,
) -> Option<Value> {
    document.map(|doc| harden(doc, suffix, environment))
}

/// The key without its suffix, if `key` is a marked key.
pub fn strip_marker<'a>(key: &'a Value, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() {
        return None;
    }
    key.as_str()?.strip_suffix(suffix)
}

fn harden_mapping(entries: &Mapping, suffix: &str, environment: Option<&str>) -> Mapping {
    let mut out = Mapping::with_capacity(entries.len());

    for (key, value) in entries {
        match strip_marker(key, suffix) {
            Some(stripped) => {
                let map = match value {
                    Value::Tagged(tagged) => &tagged.value,
                    other => other,
                };
                let resolved = resolve_for_environment(map, environment);
                tracing::trace!(
                    key = stripped,
                    environment = environment.unwrap_or("<none>"),
                    resolved = resolved.is_some(),
                    "Resolved environment value"
                );
                // Re-inserting an existing key keeps its first position.
                out.insert(
                    Value::String(stripped.to_string()),
                    resolved.unwrap_or(Value::Null),
                );
            }
            None => {
                out.insert(key.clone(), harden(value, suffix, environment));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = "_CONFIGURATOR";

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn sample_config() -> Value {
        yaml(
            r#"
a: 1
b:
  b1: 21
  b2: 22
c_CONFIGURATOR:
  default: 3Default
  dev: 3Dev
  prod: 3Prod
d_CONFIGURATOR:
  default:
    d1: 41Default
    d2: 42Default
  dev:
    d1: 41Dev
  prod:
    d1: 41Prod
    d3: 43ProdEXTRA
e: [5, 5, 5, 5, 5]
f:
  f1: "61"
  f2_CONFIGURATOR:
    default: 62Default
    dev: 62Dev
    prod: 62Prod
  f3: "63"
"#,
        )
    }

    const ENVIRONMENTS: [&str; 4] = ["dev", "test", "stage", "prod"];

    #[test]
    fn scalars_pass_through_for_every_environment() {
        for env in ENVIRONMENTS {
            assert_eq!(harden(&yaml("1"), SUFFIX, Some(env)), yaml("1"));
            assert_eq!(harden(&yaml("text"), SUFFIX, Some(env)), yaml("text"));
            assert_eq!(harden(&yaml("true"), SUFFIX, Some(env)), yaml("true"));
        }
    }

    #[test]
    fn plain_containers_pass_through_for_every_environment() {
        let config = sample_config();
        for env in ENVIRONMENTS {
            assert_eq!(harden(&config["b"], SUFFIX, Some(env)), yaml("{b1: 21, b2: 22}"));
            assert_eq!(harden(&config["e"], SUFFIX, Some(env)), yaml("[5, 5, 5, 5, 5]"));
        }
    }

    #[test]
    fn null_passes_through() {
        assert_eq!(harden(&Value::Null, SUFFIX, Some("dev")), Value::Null);
        assert_eq!(harden_optional(None, SUFFIX, Some("dev")), None);
    }

    #[test]
    fn marked_scalar_resolves_per_environment() {
        let config = sample_config();
        let expected = [
            ("dev", "3Dev"),
            ("test", "3Default"),
            ("stage", "3Default"),
            ("prod", "3Prod"),
        ];
        for (env, value) in expected {
            let hardened = harden(&config, SUFFIX, Some(env));
            assert_eq!(hardened["c"], value, "environment {env}");
            assert!(hardened.get("c_CONFIGURATOR").is_none());
        }
    }

    #[test]
    fn marked_mapping_overlays_default_per_environment() {
        let config = sample_config();
        assert_eq!(
            harden(&config, SUFFIX, Some("dev"))["d"],
            yaml("{d1: 41Dev, d2: 42Default}")
        );
        assert_eq!(
            harden(&config, SUFFIX, Some("test"))["d"],
            yaml("{d1: 41Default, d2: 42Default}")
        );
        assert_eq!(
            harden(&config, SUFFIX, Some("prod"))["d"],
            yaml("{d1: 41Prod, d2: 42Default, d3: 43ProdEXTRA}")
        );
    }

    #[test]
    fn nested_marked_keys_are_found() {
        let config = sample_config();
        assert_eq!(
            harden(&config, SUFFIX, Some("dev"))["f"],
            yaml("{f1: '61', f2: 62Dev, f3: '63'}")
        );
        assert_eq!(
            harden(&config, SUFFIX, Some("stage"))["f"],
            yaml("{f1: '61', f2: 62Default, f3: '63'}")
        );
    }

    #[test]
    fn marked_keys_inside_sequences_are_found() {
        let doc = yaml(
            r#"
servers:
  - name: a
    url_CONFIGURATOR: {default: "http://a.local", prod: "https://a.example.com"}
  - name: b
"#,
        );
        let hardened = harden(&doc, SUFFIX, Some("prod"));
        assert_eq!(hardened["servers"][0]["url"], "https://a.example.com");
        assert_eq!(hardened["servers"][1], yaml("{name: b}"));
    }

    #[test]
    fn renamed_key_keeps_its_position() {
        let doc = yaml("first: 1\nmid_CONFIGURATOR: {default: 2}\nlast: 3");
        let hardened = harden(&doc, SUFFIX, None);
        let keys: Vec<&str> = hardened
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, ["first", "mid", "last"]);
    }

    #[test]
    fn absent_environment_uses_default() {
        let doc = yaml("x_CONFIGURATOR: {default: D, dev: Dv}");
        assert_eq!(harden(&doc, SUFFIX, None)["x"], "D");
        assert_eq!(harden(&doc, SUFFIX, Some("other"))["x"], "D");
        assert_eq!(harden(&doc, SUFFIX, Some("dev"))["x"], "Dv");
    }

    #[test]
    fn unresolvable_map_becomes_null() {
        let doc = yaml("x_CONFIGURATOR: {prod: P}");
        let hardened = harden(&doc, SUFFIX, Some("dev"));
        assert!(hardened.get("x").unwrap().is_null());
    }

    #[test]
    fn marked_non_mapping_becomes_null() {
        let doc = yaml("x_CONFIGURATOR: plain");
        assert!(harden(&doc, SUFFIX, Some("dev"))["x"].is_null());
    }

    #[test]
    fn resolved_value_is_not_hardened_again() {
        let doc = yaml(
            r#"
outer_CONFIGURATOR:
  default:
    inner_CONFIGURATOR: {default: D, dev: Dv}
"#,
        );
        let hardened = harden(&doc, SUFFIX, Some("dev"));
        assert_eq!(
            hardened["outer"],
            yaml("{inner_CONFIGURATOR: {default: D, dev: Dv}}")
        );

        // A second pass resolves what the first one left behind.
        let twice = harden(&hardened, SUFFIX, Some("dev"));
        assert_eq!(twice["outer"], yaml("{inner: Dv}"));
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let doc = yaml("x_configurator: {default: D}");
        assert_eq!(harden(&doc, SUFFIX, Some("dev")), doc);
    }

    #[test]
    fn suffix_needs_no_word_boundary() {
        let doc = yaml("fooBAR_CONFIGURATOR: {default: D}");
        assert_eq!(harden(&doc, SUFFIX, None)["fooBAR"], "D");
    }

    #[test]
    fn only_trailing_suffix_is_removed() {
        let doc = yaml("a_CONFIGURATOR_b_CONFIGURATOR: {default: D}");
        assert_eq!(harden(&doc, SUFFIX, None)["a_CONFIGURATOR_b"], "D");
    }

    #[test]
    fn custom_suffix() {
        let doc = yaml("port__env: {default: 80, dev: 8080}\nport_CONFIGURATOR: kept");
        let hardened = harden(&doc, "__env", Some("dev"));
        assert_eq!(hardened["port"], 8080);
        assert_eq!(hardened["port_CONFIGURATOR"], "kept");
    }

    #[test]
    fn empty_suffix_marks_nothing() {
        let doc = sample_config();
        assert_eq!(harden(&doc, "", Some("dev")), doc);
    }

    #[test]
    fn non_string_keys_are_never_marked() {
        let doc = yaml("1: {default: D}\ntrue: x");
        assert_eq!(harden(&doc, SUFFIX, Some("dev")), doc);
    }

    #[test]
    fn stripped_key_collision_later_write_wins() {
        let doc = yaml("a: plain\na_CONFIGURATOR: {default: resolved}");
        let hardened = harden(&doc, SUFFIX, None);
        assert_eq!(hardened, yaml("a: resolved"));

        let doc = yaml("a_CONFIGURATOR: {default: resolved}\na: plain");
        let hardened = harden(&doc, SUFFIX, None);
        assert_eq!(hardened, yaml("a: plain"));
    }

    #[test]
    fn tagged_values_keep_their_tag() {
        let doc = yaml("secret: !vault {path_CONFIGURATOR: {default: dev/db, prod: prod/db}}");
        let hardened = harden(&doc, SUFFIX, Some("prod"));
        match &hardened["secret"] {
            Value::Tagged(tagged) => {
                assert_eq!(tagged.tag, "vault");
                assert_eq!(tagged.value["path"], "prod/db");
            }
            other => panic!("Expected tagged value, got {other:?}"),
        }
    }

    #[test]
    fn tagged_environment_value_map_is_resolved() {
        let doc = yaml("x_CONFIGURATOR: !t {default: D, dev: Dv}\ny_CONFIGURATOR: !t {default: D}");
        let hardened = harden(&doc, SUFFIX, Some("dev"));
        assert_eq!(hardened, yaml("x: Dv\ny: D"));
    }

    #[test]
    fn input_is_not_modified() {
        let config = sample_config();
        let before = config.clone();
        let _ = harden(&config, SUFFIX, Some("prod"));
        assert_eq!(config, before);
    }

    #[test]
    fn strip_marker_rules() {
        assert_eq!(strip_marker(&yaml("db_X"), "_X"), Some("db"));
        assert_eq!(strip_marker(&yaml("db"), "_X"), None);
        assert_eq!(strip_marker(&yaml("db_X"), ""), None);
        assert_eq!(strip_marker(&yaml("42"), "2"), None);
    }
}
