//! Environment-driven configuration.
//!
//! Every setting has a default except secrets. Loaders take a lookup function
//! so tests can supply variables without touching the process environment.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "missing required setting {}", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "invalid value for {}: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Variable lookup, usually `std::env::var(name).ok()`.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub(crate) fn env_string(lookup: Lookup<'_>, name: &str, default: &str) -> String {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn env_required(lookup: Lookup<'_>, name: &'static str) -> Result<String, ConfigError> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn env_u64(lookup: Lookup<'_>, name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(name).map(|v| v.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}

pub(crate) fn env_bool(lookup: Lookup<'_>, name: &str, default: bool) -> bool {
    lookup(name)
        .and_then(|v| match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub(crate) fn env_list(lookup: Lookup<'_>, name: &str, default: &[&str]) -> Vec<String> {
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// Settings for the remote movie catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    /// `TMDB_API_KEY` (required), `TMDB_BASE_URL`, `TMDB_TIMEOUT_SECS` (default 10).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_string(lookup, "TMDB_BASE_URL", DEFAULT_TMDB_BASE_URL),
            api_key: env_required(lookup, "TMDB_API_KEY")?,
            timeout: Duration::from_secs(env_u64(lookup, "TMDB_TIMEOUT_SECS", 10)?),
        })
    }
}

/// Settings for talking to the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub auth_base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// `AUTH_BASE_URL`, `AUTH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            auth_base_url: env_string(lookup, "AUTH_BASE_URL", DEFAULT_AUTH_BASE_URL),
            timeout: Duration::from_secs(env_u64(lookup, "AUTH_TIMEOUT_SECS", 10)?),
        })
    }
}
