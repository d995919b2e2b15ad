//! Harden command implementation.
//!
//! The `configurator harden` command reads a configuration file, hardens it
//! for the resolved environment and prints the result.

use std::io::Write;

use crate::cli::args::HardenArgs;
use crate::config::{load_document, load_host_patterns, render_document, DocumentFormat};
use crate::error::Result;
use crate::produce::{produce_config_with, ConfiguratorOptions};

use super::dispatcher::{Command, CommandResult};
use super::hostname_source;

/// The harden command implementation.
pub struct HardenCommand {
    args: HardenArgs,
}

impl HardenCommand {
    /// Create a new harden command.
    pub fn new(args: HardenArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &HardenArgs {
        &self.args
    }

    fn options(&self) -> Result<ConfiguratorOptions> {
        let hosts = self
            .args
            .hosts
            .as_deref()
            .map(load_host_patterns)
            .transpose()?;

        Ok(ConfiguratorOptions {
            config: Some(load_document(&self.args.file)?),
            hosts,
            env: self.args.env.clone(),
            suffix: self.args.suffix.clone(),
        })
    }
}

impl Command for HardenCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let options = self.options()?;
        let host = hostname_source(self.args.hostname.as_deref());

        let Some(hardened) = produce_config_with(&options, host.as_ref())? else {
            tracing::error!("{} contains no configuration", self.args.file.display());
            return Ok(CommandResult::failure(2));
        };

        let format = if self.args.json {
            DocumentFormat::Json
        } else {
            DocumentFormat::Yaml
        };
        out.write_all(render_document(&hardened, format)?.as_bytes())?;

        Ok(CommandResult::success())
    }
}
