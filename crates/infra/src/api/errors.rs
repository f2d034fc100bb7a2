//! Status + body → domain error classification
//!
//! The API reports absence of a keyed resource with an empty 2xx body rather
//! than a 404, so lookups have to be recognised from the response shape.

use hyperstore_core::ApiResponse;
use hyperstore_domain::{HyperStoreError, Result};

use super::wire::ErrorPayloadWire;

/// The resource a get-by-key operation asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub resource: &'static str,
    pub key: &'a str,
}

impl<'a> Lookup<'a> {
    pub fn new(resource: &'static str, key: &'a str) -> Self {
        Self { resource, key }
    }
}

/// Classify a non-success response.
///
/// A 4xx whose body parses into an error payload with a message becomes
/// `Validation`; everything else is `Transport` carrying the raw body.
pub fn map_error(status: u16, body: &[u8]) -> HyperStoreError {
    if (400..500).contains(&status) {
        if let Some(message) = serde_json::from_slice::<ErrorPayloadWire>(body)
            .ok()
            .and_then(|payload| payload.message().map(str::to_string))
        {
            return HyperStoreError::Validation { status, message };
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    let message = if text.is_empty() {
        format!("API returned status {status}")
    } else {
        format!("API returned status {status}: {text}")
    };
    HyperStoreError::transport(Some(status), message)
}

/// Accept a response or turn it into an error.
///
/// For lookups an empty success body means the resource does not exist.
///
/// # Errors
/// `NotFound` for an empty lookup, otherwise the result of [`map_error`] for
/// non-2xx statuses.
pub fn check_response(response: ApiResponse, lookup: Option<Lookup<'_>>) -> Result<ApiResponse> {
    if !response.is_success() {
        return Err(map_error(response.status, &response.body));
    }

    match lookup {
        Some(lookup) if response.is_empty() => {
            Err(HyperStoreError::not_found(lookup.resource, lookup.key))
        }
        _ => Ok(response),
    }
}
