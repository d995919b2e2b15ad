//! Overlay merge for environment values.
//!
//! When both the `default` entry and the environment-specific entry of an
//! environment value map are mappings, the environment entry is laid over
//! the default.
//!
//! # Merge Rules
//!
//! - One level only: nested mappings are taken whole from one side
//! - Keys in overlay replace same-named keys in base, keeping base's position
//! - Keys only in overlay are appended in overlay order
//! - Null in overlay is a value like any other (it does not delete)

use serde_yaml::Mapping;

/// Lay `overlay` over a copy of `base`.
///
/// # Arguments
///
/// * `base` - The default mapping
/// * `overlay` - The environment-specific mapping (takes precedence)
///
/// # Returns
///
/// A new mapping; neither argument is modified.
pub fn overlay_mapping(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut result = base.clone();

    for (key, value) in overlay {
        result.insert(key.clone(), value.clone());
    }

    result
}
