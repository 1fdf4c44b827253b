//! # Runtime Configuration Module
//!
//! Environment variable based configuration for the dispatcher.
//!
//! ## Environment Variables
//!
//! ### `BRRTD_ROUTES_FILE`
//!
//! Route source to load. The extension picks the parser (`.json`, `.yaml`,
//! `.yml`, `.toml`). A missing file is not an error; resolution then uses
//! convention routing only.
//!
//! Default: `config/routes.yaml`
//!
//! ### `BRRTD_MAX_INSPECTIONS`
//!
//! Upper bound on router inspections per request. Accepts decimal (`8`) or
//! hexadecimal (`0x8`).
//!
//! Default: `8`
//!
//! ### `BRRTD_RETURN_ONLY`
//!
//! `true`/`1`/`yes` makes the coordinator return failures instead of
//! normalizing them into responses.
//!
//! Default: `false`
//!
//! ### `BRRTD_HOT_RELOAD`
//!
//! `true`/`1`/`yes` watches the route source and swaps in the new table on
//! change.
//!
//! Default: `false`
//!
//! ## Usage
//!
//! ```rust
//! use brrtdispatch::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Routes: {}", config.routes_file.display());
//! ```
//!
//! Invalid values fall back to the defaults.

use std::env;
use std::path::PathBuf;

use crate::dispatcher::DEFAULT_MAX_INSPECTIONS;

/// Default route source location.
pub const DEFAULT_ROUTES_FILE: &str = "config/routes.yaml";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub routes_file: PathBuf,
    pub max_inspections: usize,
    pub return_only: bool,
    pub hot_reload: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            routes_file: PathBuf::from(DEFAULT_ROUTES_FILE),
            max_inspections: DEFAULT_MAX_INSPECTIONS,
            return_only: false,
            hot_reload: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let routes_file = lookup("BRRTD_ROUTES_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.routes_file);
        let max_inspections = match lookup("BRRTD_MAX_INSPECTIONS") {
            Some(val) => {
                let parsed = if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).ok()
                } else {
                    val.parse().ok()
                };
                parsed.filter(|n| *n > 0).unwrap_or(defaults.max_inspections)
            }
            None => defaults.max_inspections,
        };
        RuntimeConfig {
            routes_file,
            max_inspections,
            return_only: lookup("BRRTD_RETURN_ONLY").map_or(false, |v| parse_flag(&v)),
            hot_reload: lookup("BRRTD_HOT_RELOAD").map_or(false, |v| parse_flag(&v)),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RuntimeConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), RuntimeConfig::default());
    }

    #[test]
    fn test_max_inspections_hex_and_decimal() {
        assert_eq!(config(&[("BRRTD_MAX_INSPECTIONS", "0x10")]).max_inspections, 16);
        assert_eq!(config(&[("BRRTD_MAX_INSPECTIONS", "3")]).max_inspections, 3);
        assert_eq!(config(&[("BRRTD_MAX_INSPECTIONS", "zero")]).max_inspections, 8);
        assert_eq!(config(&[("BRRTD_MAX_INSPECTIONS", "0")]).max_inspections, 8);
    }

    #[test]
    fn test_flags_and_routes_file() {
        let c = config(&[
            ("BRRTD_RETURN_ONLY", "TRUE"),
            ("BRRTD_HOT_RELOAD", "1"),
            ("BRRTD_ROUTES_FILE", "/etc/app/routes.toml"),
        ]);
        assert!(c.return_only);
        assert!(c.hot_reload);
        assert_eq!(c.routes_file, PathBuf::from("/etc/app/routes.toml"));
        assert!(!config(&[("BRRTD_RETURN_ONLY", "nope")]).return_only);
    }
}
