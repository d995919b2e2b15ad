//! Hostname classification.
//!
//! Picks the environment for a hostname by testing the patterns of a
//! [`HostPatterns`] table in declaration order. Each pattern is an
//! unanchored search, so `dev` matches `web-dev-03`; anchor with `^`/`$`
//! for exact names.
//!
//! The first environment with a matching pattern wins. Overlapping tables
//! (for example a catch-all `.*` entry) are allowed and resolved purely by
//! order, never by specificity.

use regex::Regex;

use super::hosts::HostPatterns;
use crate::error::{ConfiguratorError, Result};

/// An environment selected from a hostname.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedEnvironment {
    /// The environment name.
    pub name: String,
    /// The hostname that was classified.
    pub hostname: String,
    /// The pattern that matched.
    pub pattern: String,
}

/// A compiled [`HostPatterns`] table.
///
/// Every pattern is compiled up front, so an invalid expression is reported
/// even when an earlier entry would have matched.
///
/// # Example
///
/// ```
/// use configurator::environment::{HostClassifier, HostPatterns};
///
/// let hosts = HostPatterns::new()
///     .with("simon", "dev22")
///     .with("dev", "dev")
///     .with("prod", ".*");
/// let classifier = HostClassifier::new(&hosts).unwrap();
///
/// let detected = classifier.classify("dev22").unwrap();
/// assert_eq!(detected.name, "simon");
/// assert_eq!(classifier.classify("dev55").unwrap().name, "dev");
/// ```
#[derive(Debug, Clone)]
pub struct HostClassifier {
    rules: Vec<(String, Vec<Regex>)>,
}

impl HostClassifier {
    /// Compile a table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for the first pattern that fails to compile.
    pub fn new(patterns: &HostPatterns) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|(environment, set)| -> Result<(String, Vec<Regex>)> {
                let compiled = set
                    .patterns()
                    .iter()
                    .map(|pattern| {
                        Regex::new(pattern).map_err(|source| ConfiguratorError::InvalidPattern {
                            environment: environment.to_string(),
                            pattern: pattern.clone(),
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((environment.to_string(), compiled))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Classify a hostname.
    ///
    /// Returns `None` for an empty hostname or when nothing matches.
    pub fn classify(&self, hostname: &str) -> Option<DetectedEnvironment> {
        if hostname.is_empty() {
            return None;
        }

        let matching: Vec<(&str, &Regex)> = self
            .rules
            .iter()
            .filter_map(|(name, regexes)| {
                regexes
                    .iter()
                    .find(|re| re.is_match(hostname))
                    .map(|re| (name.as_str(), re))
            })
            .collect();

        if matching.len() > 1 {
            let names: Vec<&str> = matching.iter().map(|(name, _)| *name).collect();
            tracing::debug!(
                "Host '{}' matches several environments: {}. Using '{}' (declared first).",
                hostname,
                names.join(", "),
                names[0],
            );
        }

        matching.first().map(|(name, re)| DetectedEnvironment {
            name: (*name).to_string(),
            hostname: hostname.to_string(),
            pattern: re.as_str().to_string(),
        })
    }

    /// Number of environments in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Classify a hostname against an optional table.
///
/// An absent or empty hostname, or an absent or empty table, yields
/// `Ok(None)` without compiling anything.
///
/// # Errors
///
/// Returns `InvalidPattern` if any pattern in the table is not a valid
/// regular expression.
pub fn classify(hostname: Option<&str>, patterns: Option<&HostPatterns>) -> Result<Option<String>> {
    let Some(hostname) = hostname.filter(|h| !h.is_empty()) else {
        return Ok(None);
    };
    let Some(patterns) = patterns.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let classifier = HostClassifier::new(patterns)?;
    Ok(classifier.classify(hostname).map(|detected| detected.name))
}
