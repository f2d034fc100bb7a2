use std::time::Duration;

use hyperstore_domain::constants::DEFAULT_TIMEOUT_SECS;
use hyperstore_domain::{HyperStoreError, Secret};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with timeout and authentication defaults.
///
/// Requests are sent exactly once. Admin mutations are not idempotent in
/// general (credential creation, user creation), so nothing is replayed.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, HyperStoreError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, HyperStoreError> {
        let request = builder.build().map_err(|err| HyperStoreError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: HeaderMap,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: HeaderMap::new(),
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    /// Send `Authorization: <value>` on every request.
    ///
    /// # Errors
    /// Returns `HyperStoreError::Config` if the value is not a valid header.
    pub fn auth_header(mut self, value: &Secret) -> Result<Self, HyperStoreError> {
        let mut header = HeaderValue::from_str(value.expose()).map_err(|_| {
            HyperStoreError::Config("auth header contains invalid characters".into())
        })?;
        header.set_sensitive(true);
        self.default_headers.insert(AUTHORIZATION, header);
        Ok(self)
    }

    /// Allow self-signed certificates on the admin endpoint.
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    pub fn build(self) -> Result<HttpClient, HyperStoreError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .default_headers(self.default_headers);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| HyperStoreError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
