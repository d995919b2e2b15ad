//! Environment value resolution.
//!
//! An environment value map has an optional `default` entry and one entry per
//! environment that needs a different value:
//!
//! ```yaml
//! default:
//!   host: db.internal
//!   port: 5432
//! production:
//!   host: db.prod.internal
//! ```
//!
//! [`resolve_for_environment`] turns such a map into the one value to use.

use serde_yaml::Value;

use super::merger::overlay_mapping;

/// Key holding the fallback value in an environment value map.
pub const DEFAULT_KEY: &str = "default";

/// Pick the value of an environment value map for one environment.
///
/// - Starts from the `default` entry, if any.
/// - If the map has an entry for `environment`, that entry is laid over a
///   copy of the default when both are mappings, and replaces it otherwise
///   (sequences and scalars never merge).
/// - Returns `None` when neither entry exists, when `map` is not a mapping,
///   or when `environment` is `None` and there is no default.
///
/// The merge is one level deep and the result is not hardened further.
///
/// # Example
///
/// ```
/// use configurator::config::resolve_for_environment;
/// use serde_yaml::Value;
///
/// let map: Value = serde_yaml::from_str("default: {a: 1, b: 2}\nprod: {a: 11}").unwrap();
/// let expected: Value = serde_yaml::from_str("{a: 11, b: 2}").unwrap();
///
/// assert_eq!(resolve_for_environment(&map, Some("prod")), Some(expected));
/// ```
pub fn resolve_for_environment(map: &Value, environment: Option<&str>) -> Option<Value> {
    let Value::Mapping(entries) = map else {
        return None;
    };

    let value = entries.get(DEFAULT_KEY).cloned();

    let Some(specific) = environment.and_then(|env| entries.get(env)) else {
        return value;
    };

    match (value, specific) {
        (Some(Value::Mapping(base)), Value::Mapping(overlay)) => {
            Some(Value::Mapping(overlay_mapping(&base, overlay)))
        }
        _ => Some(specific.clone()),
    }
}
