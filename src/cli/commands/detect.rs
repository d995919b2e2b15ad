//! Detect command implementation.
//!
//! The `configurator detect` command shows the hostname this machine
//! reports and the environment it classifies to.

use std::io::Write;

use crate::cli::args::DetectArgs;
use crate::config::load_host_patterns;
use crate::environment::{default_host_patterns, ResolvedEnvironment};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};
use super::hostname_source;

/// The detect command implementation.
pub struct DetectCommand {
    args: DetectArgs,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(args: DetectArgs) -> Self {
        Self { args }
    }
}

impl Command for DetectCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let patterns = match &self.args.hosts {
            Some(path) => load_host_patterns(path)?,
            None => default_host_patterns(),
        };

        let hostname = hostname_source(self.args.hostname.as_deref()).hostname();
        let resolved = ResolvedEnvironment::resolve_with_hostname(hostname.as_deref(), &patterns)?;

        writeln!(out, "hostname: {}", hostname.as_deref().unwrap_or("<unknown>"))?;
        writeln!(out, "environment: {}", resolved.name().unwrap_or("<none>"))?;
        writeln!(out, "source: {}", resolved.source)?;

        Ok(CommandResult::success())
    }
}
