//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands write their primary output to the writer they are given;
//! diagnostics go through `tracing` to stderr, so stdout stays clean for
//! piping a hardened document into a file.

pub mod completions;
pub mod detect;
pub mod dispatcher;
pub mod harden;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::environment::{HostnameSource, SystemHostname};

/// The hostname source for a `--hostname` override, or the system one.
pub(crate) fn hostname_source(hostname: Option<&str>) -> Box<dyn HostnameSource> {
    match hostname {
        Some(name) => {
            let name = name.to_string();
            Box::new(move || Some(name.clone()))
        }
        None => Box::new(SystemHostname),
    }
}
