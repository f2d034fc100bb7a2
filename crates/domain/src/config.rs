//! Client configuration structures
//!
//! Configuration is an immutable value handed to the client at construction;
//! nothing here is global.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::constants::{DEFAULT_LIST_LIMIT, DEFAULT_TIMEOUT_SECS};
use crate::errors::{HyperStoreError, Result};
use crate::types::{ListLimit, Secret};

/// Connection settings for the administration API
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the admin API, e.g. `https://hyperstore.example.com:19443`.
    pub base_url: String,
    /// Ready-made `Authorization` header value.
    #[serde(default)]
    pub auth_header: Option<Secret>,
    #[serde(default = "default_list_limit")]
    pub list_limit: i64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Skip TLS certificate verification (self-signed admin endpoints).
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_list_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_header: None,
            list_limit: DEFAULT_LIST_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_auth_header(mut self, auth_header: impl Into<Secret>) -> Self {
        self.auth_header = Some(auth_header.into());
        self
    }

    #[must_use]
    pub fn with_list_limit(mut self, list_limit: i64) -> Self {
        self.list_limit = list_limit;
        self
    }

    #[must_use]
    pub fn with_accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validated page window.
    ///
    /// # Errors
    /// Returns `HyperStoreError::Config` when `list_limit` is zero or negative.
    pub fn list_limit(&self) -> Result<ListLimit> {
        ListLimit::new(self.list_limit)
    }

    /// Parsed base URL.
    ///
    /// # Errors
    /// Returns `HyperStoreError::Config` if the URL is malformed or not http(s).
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            HyperStoreError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(HyperStoreError::Config(format!(
                "Unsupported base URL scheme '{other}', expected http or https"
            ))),
        }
    }

    /// Check every setting that can be checked without I/O.
    ///
    /// # Errors
    /// Returns the first `HyperStoreError::Config` found.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        self.list_limit()?;
        if self.timeout_secs == 0 {
            return Err(HyperStoreError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
