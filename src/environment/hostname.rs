//! Hostname lookup.
//!
//! The hostname is the only thing configurator reads from the machine. It is
//! read through the [`HostnameSource`] trait so that callers and tests can
//! substitute their own.

use std::process::Command;

/// Something that can report the current machine's hostname.
///
/// Closures returning `Option<String>` implement this trait:
///
/// ```
/// use configurator::environment::HostnameSource;
///
/// let fixed = || Some("stage01".to_string());
/// assert_eq!(fixed.hostname().as_deref(), Some("stage01"));
/// ```
pub trait HostnameSource {
    /// The hostname, or `None` if it cannot be determined.
    fn hostname(&self) -> Option<String>;
}

impl<F> HostnameSource for F
where
    F: Fn() -> Option<String>,
{
    fn hostname(&self) -> Option<String> {
        self()
    }
}

/// Reads the hostname of the machine the process runs on.
///
/// Sources, in order:
/// 1. `/proc/sys/kernel/hostname` (Linux)
/// 2. the `hostname` command
/// 3. `COMPUTERNAME` environment variable (Windows)
/// 4. `HOSTNAME` environment variable
///
/// An exported `HOSTNAME` never overrides what the system reports.
///
/// The full name is returned; domain parts are kept so patterns can match
/// on them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl SystemHostname {
    /// Look up the hostname with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(env_fn: F) -> Option<String>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        Self::detect_with(env_fn, system_hostname)
    }

    /// Look up the hostname with custom system and env var lookups.
    pub fn detect_with<F, S>(env_fn: F, system_fn: S) -> Option<String>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
        S: FnOnce() -> Option<String>,
    {
        if let Some(name) = system_fn() {
            tracing::debug!("Hostname '{}' read from the system", name);
            return Some(name);
        }

        for var in ["COMPUTERNAME", "HOSTNAME"] {
            if let Some(name) = env_fn(var).ok().and_then(|v| non_empty(&v)) {
                tracing::debug!("Hostname '{}' read from {}", name, var);
                return Some(name);
            }
        }

        None
    }
}

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> Option<String> {
        Self::detect_with_env(|key| std::env::var(key))
    }
}

fn system_hostname() -> Option<String> {
    read_kernel_hostname().or_else(hostname_command)
}

fn read_kernel_hostname() -> Option<String> {
    std::fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .and_then(|s| non_empty(&s))
}

fn hostname_command() -> Option<String> {
    let out = Command::new("hostname").output().ok()?;
    if !out.status.success() {
        return None;
    }
    non_empty(&String::from_utf8_lossy(&out.stdout))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
