//! Error types used throughout the client
//!
//! `NotFound` must stay recognisable after any amount of wrapping, so it is a
//! typed variant checked by kind, never by message. Use
//! [`HyperStoreError::is_not_found`] on a domain error, or the free function
//! [`is_not_found`] on any `std::error::Error` chain (including `anyhow`).

use std::error::Error as StdError;

use thiserror::Error;

/// Main error type for HyperStore operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HyperStoreError {
    /// The API answered a get-by-key request with an empty success body.
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// The payload did not match the expected (loose) wire schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The API rejected the request with a structured error payload.
    #[error("Validation error ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Network failure or an unclassified status.
    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    /// A value was rejected before any request left the client.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another error annotated with the operation that produced it. The
    /// message already includes `inner`, so it is not exposed as `source()`.
    #[error("{context}: {inner}")]
    Context { context: String, inner: Box<HyperStoreError> },
}

/// Result type alias for HyperStore operations
pub type Result<T> = std::result::Result<T, HyperStoreError>;

/// Categories of errors, independent of any context wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Decode,
    Validation,
    Transport,
    Cancelled,
    Config,
}

impl HyperStoreError {
    pub fn not_found(resource: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound { resource, key: key.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport { status, message: message.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Wrap this error with additional context.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context { context: context.into(), inner: Box::new(self) }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &Self {
        let mut current = self;
        while let Self::Context { inner, .. } = current {
            current = inner;
        }
        current
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::Config(_) => ErrorCategory::Config,
            Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::Context { inner, .. } => inner.category(),
        }
    }

    /// Check whether this error, at any depth of context, is `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }
}

/// Check whether any error in the `source()` chain is a [`HyperStoreError`]
/// of kind `NotFound`.
///
/// Works for errors wrapped by other error types, including `anyhow`
/// context layers:
///
/// ```
/// use hyperstore_domain::{is_not_found, HyperStoreError};
///
/// let err = anyhow::Error::new(HyperStoreError::not_found("group", "QA"))
///     .context("wrap it");
/// assert!(is_not_found(&*err));
///
/// let generic = std::io::Error::other("Random failure");
/// assert!(!is_not_found(&generic));
/// ```
pub fn is_not_found(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(domain) = err.downcast_ref::<HyperStoreError>() {
            if domain.is_not_found() {
                return true;
            }
        }
        current = err.source();
    }
    false
}

/// Extension trait for attaching operation context to results
pub trait ResultExt<T> {
    /// Wrap the error, if any, with a fixed context message.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Wrap the error, if any, with a lazily built context message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|err| err.context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.context(f()))
    }
}
