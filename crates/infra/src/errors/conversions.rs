//! Conversions from external infrastructure errors into domain errors.

use hyperstore_domain::HyperStoreError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HyperStoreError);

impl From<InfraError> for HyperStoreError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HyperStoreError> for InfraError {
    fn from(value: HyperStoreError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoHyperStoreError {
    fn into_hyperstore(self) -> HyperStoreError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HyperStoreError */
/* -------------------------------------------------------------------------- */

impl IntoHyperStoreError for HttpError {
    fn into_hyperstore(self) -> HyperStoreError {
        let status = self.status().map(|status| status.as_u16());

        if self.is_timeout() {
            return HyperStoreError::transport(status, "HTTP request timed out");
        }

        if self.is_connect() {
            return HyperStoreError::transport(status, format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return HyperStoreError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return HyperStoreError::transport(status, format!("failed to read response: {self}"));
        }

        HyperStoreError::transport(status, self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_hyperstore())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HyperStoreError */
/* -------------------------------------------------------------------------- */

impl IntoHyperStoreError for JsonError {
    fn into_hyperstore(self) -> HyperStoreError {
        if self.is_eof() && self.line() == 1 && self.column() == 0 {
            return HyperStoreError::decode("empty response body");
        }
        HyperStoreError::decode(format!("invalid JSON payload: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_hyperstore())
    }
}

/* -------------------------------------------------------------------------- */
/* toml / io errors → HyperStoreError::Config */
/* -------------------------------------------------------------------------- */

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(HyperStoreError::Config(format!("Invalid TOML format: {value}")))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(HyperStoreError::Config(format!("Failed to read config file: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
