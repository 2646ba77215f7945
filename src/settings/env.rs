//! Environment snapshot
//!
//! Settings are resolved against an explicit, immutable capture of the
//! variable table instead of reading the ambient process environment
//! mid-construction. Tests build snapshots from literal pairs; production
//! callers capture the live environment once.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Immutable capture of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Snapshot with no variables set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    /// Variable value, or `default` when absent.
    pub(crate) fn get_or(&self, var: &str, default: &str) -> String {
        self.get(var).unwrap_or(default).to_string()
    }

    /// Parse a variable, falling back to `default` when absent.
    ///
    /// A value that is present but does not parse is a fatal construction
    /// error, never a silent fallback.
    pub(crate) fn parse_or<T>(&self, var: &'static str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(var) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|e: T::Err| Error::InvalidEnvVar {
                var,
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl FromIterator<(String, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
