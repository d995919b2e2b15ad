//! Document loading and rendering.
//!
//! The core API works on parsed [`Value`]s. This module is the thin layer
//! that reads them from YAML or JSON text and writes them back out. Mapping
//! order is preserved in both directions, which matters for hostname-pattern
//! tables where order is match priority.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::environment::HostPatterns;
use crate::error::{ConfiguratorError, Result};

/// Text format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// YAML (also accepts JSON, which is valid YAML).
    #[default]
    Yaml,
    /// JSON.
    Json,
}

impl DocumentFormat {
    /// Pick a format from a file extension: `.json` is JSON, anything else
    /// is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse document text.
///
/// # Arguments
///
/// * `content` - The text to parse
/// * `format` - The text format
/// * `source_path` - Path for error reporting
///
/// An empty YAML document parses to `Value::Null`.
pub fn parse_document(content: &str, format: DocumentFormat, source_path: &Path) -> Result<Value> {
    let parsed: std::result::Result<Value, String> = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        // Deserialize straight into the YAML value so object key order
        // survives.
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| ConfiguratorError::ConfigParseError {
        path: source_path.to_path_buf(),
        message,
    })
}

/// Load a document from a file, choosing the format from its extension.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the content is invalid.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfiguratorError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfiguratorError::Io(e)
        }
    })?;

    tracing::debug!("Loading document from {}", path.display());
    parse_document(&content, DocumentFormat::from_path(path), path)
}

/// Load a hostname-pattern table from a file.
///
/// # Errors
///
/// Fails as [`load_document`] does, and with `InvalidHostPatterns` if the
/// document is not a mapping of names to a pattern or list of patterns.
pub fn load_host_patterns(path: &Path) -> Result<HostPatterns> {
    HostPatterns::from_value(&load_document(path)?)
}

/// Render a document as text.
///
/// # Errors
///
/// JSON output fails for documents JSON cannot express, such as mappings
/// with non-string keys.
pub fn render_document(document: &Value, format: DocumentFormat) -> Result<String> {
    let rendered = match format {
        DocumentFormat::Yaml => serde_yaml::to_string(document).map_err(anyhow::Error::from)?,
        DocumentFormat::Json => {
            let mut json = serde_json::to_string_pretty(document).map_err(anyhow::Error::from)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}
