//! Environment detection and resolution.
//!
//! Determines which environment (development, test, staging, production or
//! any custom name) a machine belongs to. The priority chain is:
//!
//! 1. Explicit environment name from the caller
//! 2. Hostname classification against an ordered [`HostPatterns`] table
//! 3. No environment

pub mod classifier;
pub mod hostname;
pub mod hosts;
pub mod resolver;

pub use classifier::{classify, DetectedEnvironment, HostClassifier};
pub use hostname::{HostnameSource, SystemHostname};
pub use hosts::{default_host_patterns, HostPatterns, PatternSet};
pub use resolver::{EnvironmentSource, ResolvedEnvironment};
