//! reqwest transport

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::endpoint::Method;
use super::error::{ClientError, ClientResult};
use super::{ApiRequest, ApiResponse, Transport};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Connection settings for the HTTP transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the agenda API (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// HTTP transport backed by a shared reqwest client
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("agenda/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = request.endpoint.url(&self.config.base_url);

        let builder = match request.endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(ClientError::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ClientError::from_reqwest)?;

        Ok(ApiResponse { status, body })
    }
}
