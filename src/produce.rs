//! The main entry point: one call from a raw document to a hardened one.
//!
//! [`produce_config`] resolves the environment (explicit name, or hostname
//! classification), hardens the document for it, and records the
//! environment under [`ENVIRONMENT_KEY`].

use std::borrow::Cow;

use serde_yaml::Value;

use crate::config::harden;
use crate::environment::{
    default_host_patterns, HostPatterns, HostnameSource, ResolvedEnvironment, SystemHostname,
};
use crate::error::Result;

/// Marker suffix used when the caller does not supply one.
pub const DEFAULT_SUFFIX: &str = "_CONFIGURATOR";

/// Top-level key that records the resolved environment in the output.
pub const ENVIRONMENT_KEY: &str = "__CONFIGURATOR_ENVIRONMENT__";

/// Inputs for [`produce_config`].
///
/// Only `config` is required. Empty strings for `env` and `suffix` count as
/// not supplied.
#[derive(Debug, Clone, Default)]
pub struct ConfiguratorOptions {
    /// The document to harden.
    pub config: Option<Value>,
    /// Hostname patterns; [`default_host_patterns`] when `None`.
    pub hosts: Option<HostPatterns>,
    /// Explicit environment; skips hostname classification.
    pub env: Option<String>,
    /// Marker suffix; [`DEFAULT_SUFFIX`] when `None`.
    pub suffix: Option<String>,
}

impl ConfiguratorOptions {
    /// Options for a document, everything else defaulted.
    pub fn new(config: Value) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    pub fn with_hosts(mut self, hosts: HostPatterns) -> Self {
        self.hosts = Some(hosts);
        self
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// The suffix in effect.
    pub fn suffix(&self) -> &str {
        self.suffix
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUFFIX)
    }

    /// The explicit environment, if a non-empty one was given.
    pub fn explicit_env(&self) -> Option<&str> {
        self.env.as_deref().filter(|e| !e.is_empty())
    }

    /// The hostname patterns in effect.
    pub fn host_patterns(&self) -> Cow<'_, HostPatterns> {
        match &self.hosts {
            Some(hosts) => Cow::Borrowed(hosts),
            None => Cow::Owned(default_host_patterns()),
        }
    }
}

/// Harden `options.config` for the environment of this machine.
///
/// Returns `Ok(None)` when there is no document. The hostname is read from
/// the operating system only if `options.env` is absent.
///
/// # Errors
///
/// Returns `InvalidPattern` if hostname classification runs and a pattern
/// is not a valid regular expression.
///
/// # Example
///
/// ```
/// use configurator::{produce_config, ConfiguratorOptions, ENVIRONMENT_KEY};
///
/// let config = serde_yaml::from_str("a: 1\nc_CONFIGURATOR: {default: D, dev: Dv}").unwrap();
/// let options = ConfiguratorOptions::new(config).with_env("dev");
///
/// let hardened = produce_config(&options).unwrap().unwrap();
/// assert_eq!(hardened["a"], 1);
/// assert_eq!(hardened["c"], "Dv");
/// assert_eq!(hardened[ENVIRONMENT_KEY], "dev");
/// ```
pub fn produce_config(options: &ConfiguratorOptions) -> Result<Option<Value>> {
    produce_config_with(options, &SystemHostname)
}

/// [`produce_config`] with a caller-supplied hostname source.
pub fn produce_config_with(
    options: &ConfiguratorOptions,
    host: &dyn HostnameSource,
) -> Result<Option<Value>> {
    let Some(config) = options.config.as_ref().filter(|c| !c.is_null()) else {
        tracing::debug!("No configuration document supplied");
        return Ok(None);
    };

    let environment = resolve_environment(options, host)?;
    tracing::debug!(
        "Hardening with suffix '{}' for environment {} ({})",
        options.suffix(),
        environment.name().unwrap_or("<none>"),
        environment.source
    );

    let mut hardened = harden(config, options.suffix(), environment.name());
    stamp_environment(&mut hardened, environment.name());
    Ok(Some(hardened))
}

/// Resolve the environment `options` select, without hardening anything.
///
/// # Errors
///
/// Returns `InvalidPattern` as [`produce_config`] does.
pub fn resolve_environment(
    options: &ConfiguratorOptions,
    host: &dyn HostnameSource,
) -> Result<ResolvedEnvironment> {
    ResolvedEnvironment::resolve(options.explicit_env(), &options.host_patterns(), host)
}

fn stamp_environment(document: &mut Value, environment: Option<&str>) {
    let stamp = environment.map_or(Value::Null, |name| Value::String(name.to_string()));

    match document {
        Value::Mapping(entries) => {
            entries.insert(Value::String(ENVIRONMENT_KEY.to_string()), stamp);
        }
        _ => tracing::warn!(
            "Configuration document is not a mapping; {} not recorded",
            ENVIRONMENT_KEY
        ),
    }
}
