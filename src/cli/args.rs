//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Configurator - Resolve per-environment configuration by hostname.
#[derive(Debug, Parser)]
#[command(name = "configurator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Harden a configuration file for this machine's environment
    Harden(HardenArgs),

    /// Show which environment this machine resolves to
    Detect(DetectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `harden` command.
#[derive(Debug, Clone, clap::Args)]
pub struct HardenArgs {
    /// Configuration file (YAML, or JSON with a .json extension)
    pub file: PathBuf,

    /// Hostname-pattern file (defaults to the built-in table)
    #[arg(long)]
    pub hosts: Option<PathBuf>,

    /// Environment to use instead of classifying the hostname
    #[arg(short, long, env = "CONFIGURATOR_ENV")]
    pub env: Option<String>,

    /// Key suffix marking environment-specific values
    #[arg(short, long, env = "CONFIGURATOR_SUFFIX")]
    pub suffix: Option<String>,

    /// Hostname to classify instead of this machine's
    #[arg(long)]
    pub hostname: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Hostname-pattern file (defaults to the built-in table)
    #[arg(long)]
    pub hosts: Option<PathBuf>,

    /// Hostname to classify instead of this machine's
    #[arg(long)]
    pub hostname: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
