//! Configurator - Per-environment configuration resolved by hostname.
//!
//! A configuration document marks environment-specific values with a key
//! suffix (`_CONFIGURATOR` by default). Configurator works out which
//! environment the current machine belongs to, either from an explicit name
//! or by matching its hostname against a table of patterns, and "hardens"
//! the document: every marked key loses its suffix and its value collapses
//! to the entry for that environment, overlaid on the `default` entry.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Value resolution, hardening and document loading
//! - [`environment`] - Hostname patterns, classification and resolution
//! - [`error`] - Error types and result aliases
//! - [`produce`] - The one-call entry point
//!
//! # Example
//!
//! ```
//! use configurator::environment::HostPatterns;
//! use configurator::{produce_config_with, ConfiguratorOptions};
//!
//! let config = serde_yaml::from_str(
//!     "db_CONFIGURATOR:\n  default: {host: localhost, port: 5432}\n  prod: {host: db.internal}\n",
//! )
//! .unwrap();
//! let options = ConfiguratorOptions::new(config)
//!     .with_hosts(HostPatterns::new().with("prod", "^web-\\d+$"));
//! let host = || Some("web-07".to_string());
//!
//! let hardened = produce_config_with(&options, &host).unwrap().unwrap();
//! assert_eq!(hardened["db"]["host"], "db.internal");
//! assert_eq!(hardened["db"]["port"], 5432);
//! assert_eq!(hardened["__CONFIGURATOR_ENVIRONMENT__"], "prod");
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod produce;

pub use error::{ConfiguratorError, Result};
pub use produce::{
    produce_config, produce_config_with, resolve_environment, ConfiguratorOptions,
    DEFAULT_SUFFIX, ENVIRONMENT_KEY,
};
