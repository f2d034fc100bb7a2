//! reqwest-backed implementation of the core [`Transport`] port.

use async_trait::async_trait;
use hyperstore_core::{ApiRequest, ApiResponse, HttpMethod, Transport};
use hyperstore_domain::{ClientConfig, HyperStoreError, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use super::client::HttpClient;
use crate::errors::InfraError;

/// Sends [`ApiRequest`]s to the admin API over HTTP(S).
#[derive(Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(http: HttpClient, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Build the HTTP client from connection settings.
    ///
    /// # Errors
    /// Returns `HyperStoreError::Config` for an invalid URL, auth header or
    /// TLS setup.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;

        let mut builder = HttpClient::builder()
            .timeout(config.timeout())
            .accept_invalid_certs(config.accept_invalid_certs);
        if let Some(auth) = &config.auth_header {
            builder = builder.auth_header(auth)?;
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self::new(builder.build()?, base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| HyperStoreError::Config(format!("Invalid request URL '{joined}': {e}")))
    }

    async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.endpoint(&request.path)?;

        let mut builder = self.http.request(to_reqwest_method(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = self.http.send(builder).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| HyperStoreError::from(InfraError::from(e)))?;

        debug!(status, bytes = body.len(), "response body read");
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(
        skip(self, request, cancel),
        fields(method = %request.method, path = %request.path)
    )]
    async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        if cancel.is_cancelled() {
            return Err(HyperStoreError::Cancelled);
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(HyperStoreError::Cancelled),
            response = self.exchange(request) => response,
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}
