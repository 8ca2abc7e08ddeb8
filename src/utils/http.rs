//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;

use crate::config::HttpConfig;
use crate::sources::SourceError;

/// Default user agent, `pubmed-papers/<version>`
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client with default timeouts
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client from HTTP settings
    pub fn from_config(config: &HttpConfig) -> Result<Self, SourceError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// GET a URL with query parameters and return the body as text.
    ///
    /// Non-success statuses become errors; 429 maps to [`SourceError::RateLimit`]
    /// and 5xx to [`SourceError::Network`] so that callers can retry them.
    pub async fn get_text(&self, url: &str, params: &[(&str, String)]) -> Result<String, SourceError> {
        Self::send_text(self.client.get(url).query(params), url).await
    }

    /// POST parameters as an `application/x-www-form-urlencoded` body.
    ///
    /// Same status mapping as [`HttpClient::get_text`].
    pub async fn post_form_text(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<String, SourceError> {
        Self::send_text(self.client.post(url).form(params), url).await
    }

    async fn send_text(request: RequestBuilder, url: &str) -> Result<String, SourceError> {
        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimit);
        }
        if status.is_server_error() {
            return Err(SourceError::Network(format!("{} returned status {}", url, status)));
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!("{} returned status {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }
}
