//! Credential types

use serde::Deserialize;

/// A sensitive string that never appears in logs or debug output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// An S3 access/secret key pair belonging to one user
///
/// A user may hold several pairs at once (key rotation). Pairs are never
/// updated, only created, fetched, listed and deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityInfo {
    pub access_key: String,
    pub secret_key: Secret,
    /// Creation time in epoch milliseconds, when the API reports it.
    pub created_at: Option<i64>,
}

impl SecurityInfo {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<Secret>) -> Self {
        Self { access_key: access_key.into(), secret_key: secret_key.into(), created_at: None }
    }
}
