//! Hostname-pattern mappings.
//!
//! A [`HostPatterns`] table maps environment names to one or more regular
//! expressions. The table is ordered: when a hostname matches patterns of
//! several environments, the entry declared first wins. Documents are read in
//! declaration order, so a YAML or JSON mapping keeps its priority when
//! loaded.

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

use crate::error::{ConfiguratorError, Result};

/// The pattern(s) that classify a hostname into one environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternSet {
    /// A single regular expression.
    Single(String),
    /// Several regular expressions, any of which may match.
    Many(Vec<String>),
}

impl PatternSet {
    /// All patterns in declaration order.
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::Single(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for PatternSet {
    fn from(pattern: &str) -> Self {
        Self::Single(pattern.to_string())
    }
}

impl From<String> for PatternSet {
    fn from(pattern: String) -> Self {
        Self::Single(pattern)
    }
}

impl From<Vec<&str>> for PatternSet {
    fn from(patterns: Vec<&str>) -> Self {
        Self::Many(patterns.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for PatternSet {
    fn from(patterns: Vec<String>) -> Self {
        Self::Many(patterns)
    }
}

/// Ordered table of environment name → hostname pattern(s).
///
/// # Example
///
/// ```
/// use configurator::environment::HostPatterns;
///
/// let hosts = HostPatterns::new()
///     .with("dev", vec!["dev", "localhost"])
///     .with("prod", ".*");
///
/// let names: Vec<&str> = hosts.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["dev", "prod"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPatterns {
    entries: Vec<(String, PatternSet)>,
}

impl HostPatterns {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`HostPatterns::insert`].
    pub fn with(mut self, environment: impl Into<String>, patterns: impl Into<PatternSet>) -> Self {
        self.insert(environment, patterns);
        self
    }

    /// Add an entry at the end of the table.
    ///
    /// Re-inserting an existing environment replaces its patterns but keeps
    /// its original position.
    pub fn insert(&mut self, environment: impl Into<String>, patterns: impl Into<PatternSet>) {
        let environment = environment.into();
        let patterns = patterns.into();

        match self.entries.iter_mut().find(|(name, _)| *name == environment) {
            Some((_, existing)) => *existing = patterns,
            None => self.entries.push((environment, patterns)),
        }
    }

    /// Patterns registered for an environment.
    pub fn get(&self, environment: &str) -> Option<&PatternSet> {
        self.entries
            .iter()
            .find(|(name, _)| name == environment)
            .map(|(_, patterns)| patterns)
    }

    /// Entries in match-priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatternSet)> {
        self.entries
            .iter()
            .map(|(name, patterns)| (name.as_str(), patterns))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a table from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHostPatterns` unless the value is a mapping of
    /// environment names to a string or a list of strings.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_yaml::from_value(value.clone()).map_err(|e| ConfiguratorError::InvalidHostPatterns {
            message: e.to_string(),
        })
    }
}

impl<K, P> FromIterator<(K, P)> for HostPatterns
where
    K: Into<String>,
    P: Into<PatternSet>,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut patterns = Self::new();
        for (environment, set) in iter {
            patterns.insert(environment, set);
        }
        patterns
    }
}

// Read through an ordered `Mapping`; a HashMap or BTreeMap in between would
// reorder the table.
impl<'de> Deserialize<'de> for HostPatterns {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let mapping = Mapping::deserialize(deserializer)?;

        let mut patterns = HostPatterns::new();
        for (key, value) in mapping {
            let Some(environment) = key.as_str().map(str::to_string) else {
                return Err(D::Error::custom(format!(
                    "environment names must be strings, got {key:?}"
                )));
            };
            let set: PatternSet = serde_yaml::from_value(value).map_err(|e| {
                D::Error::custom(format!("patterns for '{environment}': {e}"))
            })?;
            patterns.insert(environment, set);
        }
        Ok(patterns)
    }
}

/// The table used when a caller does not supply one.
///
/// `production` matches every hostname, so any machine that is not a
/// development, test or staging host is treated as production.
pub fn default_host_patterns() -> HostPatterns {
    HostPatterns::new()
        .with("development", "dev")
        .with("test", "test")
        .with("staging", "stage")
        .with("production", ".*")
}
