//! Environment resolution.
//!
//! Resolves the active environment using the priority chain:
//! 1. Explicit environment name from the caller
//! 2. Hostname classification against a [`HostPatterns`] table
//! 3. No environment (soft absence, not an error)

use std::fmt;

use super::classifier::HostClassifier;
use super::hostname::HostnameSource;
use super::hosts::HostPatterns;
use crate::error::Result;

/// How the environment was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentSource {
    /// Supplied by the caller; no hostname lookup happened.
    Explicit,
    /// Classified from the hostname.
    Hostname {
        /// The hostname that was classified.
        hostname: String,
        /// The pattern that matched.
        pattern: String,
    },
    /// No pattern matched, or the hostname was unavailable.
    Unmatched {
        /// The hostname that was tried, if one was available.
        hostname: Option<String>,
    },
}

impl fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::Hostname { hostname, pattern } => {
                write!(f, "hostname '{}' matched '{}'", hostname, pattern)
            }
            Self::Unmatched {
                hostname: Some(hostname),
            } => write!(f, "no pattern matched hostname '{}'", hostname),
            Self::Unmatched { hostname: None } => write!(f, "hostname unavailable"),
        }
    }
}

/// A resolved environment with its name and how it was determined.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnvironment {
    /// The environment name, or `None` if nothing was resolved.
    pub name: Option<String>,
    /// How this environment was determined.
    pub source: EnvironmentSource,
}

impl ResolvedEnvironment {
    /// Resolve the environment using the priority chain.
    ///
    /// The hostname source is only consulted when `explicit` is absent or
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if classification runs and a pattern does
    /// not compile.
    ///
    /// # Example
    ///
    /// ```
    /// use configurator::environment::{EnvironmentSource, HostPatterns, ResolvedEnvironment};
    ///
    /// let hosts = HostPatterns::new().with("prod", ".*");
    /// let host = || Some("web-01".to_string());
    ///
    /// let resolved = ResolvedEnvironment::resolve(Some("staging"), &hosts, &host).unwrap();
    /// assert_eq!(resolved.name(), Some("staging"));
    /// assert_eq!(resolved.source, EnvironmentSource::Explicit);
    ///
    /// let resolved = ResolvedEnvironment::resolve(None, &hosts, &host).unwrap();
    /// assert_eq!(resolved.name(), Some("prod"));
    /// ```
    pub fn resolve(
        explicit: Option<&str>,
        patterns: &HostPatterns,
        host: &dyn HostnameSource,
    ) -> Result<Self> {
        if let Some(name) = explicit.filter(|n| !n.is_empty()) {
            return Ok(Self {
                name: Some(name.to_string()),
                source: EnvironmentSource::Explicit,
            });
        }

        let hostname = host.hostname();
        Self::resolve_with_hostname(hostname.as_deref(), patterns)
    }

    /// Resolve from an already known hostname (for testing).
    pub fn resolve_with_hostname(hostname: Option<&str>, patterns: &HostPatterns) -> Result<Self> {
        let hostname = hostname.filter(|h| !h.is_empty());

        let detected = match hostname {
            Some(h) if !patterns.is_empty() => HostClassifier::new(patterns)?.classify(h),
            _ => None,
        };

        Ok(match detected {
            Some(detected) => Self {
                name: Some(detected.name),
                source: EnvironmentSource::Hostname {
                    hostname: detected.hostname,
                    pattern: detected.pattern,
                },
            },
            None => Self {
                name: None,
                source: EnvironmentSource::Unmatched {
                    hostname: hostname.map(str::to_string),
                },
            },
        })
    }

    /// The environment name as a borrowed string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
