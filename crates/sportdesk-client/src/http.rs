//! HTTP client for the dashboard REST API

use crate::error::{ClientError, ClientResult};
use crate::source::PageSource;
use async_trait::async_trait;
use reqwest::{Client, Url};
use sportdesk_core::PageResponse;
use sportdesk_core::config::ApiConfig;
use std::time::Duration;
use tracing::{debug, warn};

/// API client for the upstream dashboard API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = parse_base(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Base URL resource paths are joined onto
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a resource path onto the base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn resolve(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::invalid_url(path, e.to_string()))
    }

    /// Delete one item upstream
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a non-success status.
    pub async fn delete_item(&self, url: &Url) -> ClientResult<()> {
        debug!(url = %url, "Sending DELETE");

        let response = self.client.delete(url.clone()).send().await?;

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "DELETE rejected");
            return Err(ClientError::unexpected_status(
                url.as_str(),
                response.status().as_u16(),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl PageSource for ApiClient {
    async fn fetch_page(&self, url: &Url) -> ClientResult<PageResponse> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::unexpected_status(
                url.as_str(),
                response.status().as_u16(),
            ));
        }

        let body = response.bytes().await?;

        PageResponse::from_json(&body).map_err(|e| ClientError::malformed(url.as_str(), e.to_string()))
    }
}

/// Parse the base URL, making sure relative joins keep its last segment
fn parse_base(base_url: &str) -> ClientResult<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_url(base_url, "base URL is empty"));
    }

    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    Url::parse(&with_slash).map_err(|e| ClientError::invalid_url(base_url, e.to_string()))
}
