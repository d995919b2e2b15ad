//! Configuration document handling.
//!
//! This module handles everything that touches the document itself:
//! - Environment value resolution in [`resolver`]
//! - One-level overlay merging in [`merger`]
//! - Recursive hardening in [`harden`]
//! - Reading and writing YAML/JSON in [`loader`]
//!
//! # Example
//!
//! ```
//! use configurator::config::harden;
//!
//! let doc: serde_yaml::Value = serde_yaml::from_str(
//!     r#"
//! name: api
//! db_CONFIGURATOR:
//!   default: {host: localhost, port: 5432}
//!   production: {host: db.prod}
//! "#,
//! )
//! .unwrap();
//!
//! let hardened = harden(&doc, "_CONFIGURATOR", Some("production"));
//! assert_eq!(hardened["db"]["host"], "db.prod");
//! assert_eq!(hardened["db"]["port"], 5432);
//! ```

pub mod harden;
pub mod loader;
pub mod merger;
pub mod resolver;

#[cfg(test)]
mod proptests;

// Hardening re-exports
pub use harden::{harden, harden_optional, strip_marker};

// Loader re-exports
pub use loader::{
    load_document, load_host_patterns, parse_document, render_document, DocumentFormat,
};

// Merger re-exports
pub use merger::overlay_mapping;

// Resolver re-exports
pub use resolver::{resolve_for_environment, DEFAULT_KEY};
