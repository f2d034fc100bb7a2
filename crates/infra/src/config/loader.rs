//! Configuration loader
//!
//! Loads [`ClientConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `HYPERSTORE_BASE_URL` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `HYPERSTORE_BASE_URL`: Admin API base URL (required)
//! - `HYPERSTORE_AUTH_HEADER`: Complete `Authorization` header value
//! - `HYPERSTORE_LIST_LIMIT`: Page size for listings (default 100)
//! - `HYPERSTORE_TIMEOUT_SECS`: Request timeout in seconds (default 30)
//! - `HYPERSTORE_INSECURE_TLS`: Accept self-signed certificates (true/false)
//!
//! ## File Locations
//! The loader probes `hyperstore.json` then `hyperstore.toml` in the current
//! working directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};

use hyperstore_domain::constants::{DEFAULT_LIST_LIMIT, DEFAULT_TIMEOUT_SECS};
use hyperstore_domain::{ClientConfig, HyperStoreError, Result, Secret};

use crate::errors::InfraError;

pub const ENV_BASE_URL: &str = "HYPERSTORE_BASE_URL";
pub const ENV_AUTH_HEADER: &str = "HYPERSTORE_AUTH_HEADER";
pub const ENV_LIST_LIMIT: &str = "HYPERSTORE_LIST_LIMIT";
pub const ENV_TIMEOUT_SECS: &str = "HYPERSTORE_TIMEOUT_SECS";
pub const ENV_INSECURE_TLS: &str = "HYPERSTORE_INSECURE_TLS";

const CONFIG_FILE_NAMES: [&str; 2] = ["hyperstore.json", "hyperstore.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `HyperStoreError::Config` if configuration cannot be loaded from
/// either source or fails validation.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `HyperStoreError::Config` if `HYPERSTORE_BASE_URL` is missing or
/// a value is invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var(ENV_BASE_URL)?;

    let list_limit = env_parse(ENV_LIST_LIMIT, "list limit")?.unwrap_or(DEFAULT_LIST_LIMIT);
    let timeout_secs = env_parse(ENV_TIMEOUT_SECS, "timeout")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    let config = ClientConfig {
        base_url,
        auth_header: std::env::var(ENV_AUTH_HEADER).ok().map(Secret::from),
        list_limit,
        timeout_secs,
        accept_invalid_certs: env_bool(ENV_INSECURE_TLS, false),
        user_agent: None,
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`]. The format is chosen by file extension.
///
/// # Errors
/// Returns `HyperStoreError::Config` if no file is found, it cannot be read
/// or parsed, or the result fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HyperStoreError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HyperStoreError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, by the extension of `path`.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HyperStoreError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(HyperStoreError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        HyperStoreError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| HyperStoreError::Config(format!("Invalid {what} in {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
