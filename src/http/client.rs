//! HTTP client for single-page GETs
//!
//! Each call issues exactly one request: no retries, no backoff. A page is
//! only accepted on `200 OK`; anything else comes back as
//! `Error::HttpStatus` carrying the status and body.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{parse_link_header, LinkSet};
use crate::types::StringMap;
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Accept header sent with every request
pub const ACCEPT_JSON: &str = "application/json";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            timeout: client.timeout(),
            rate_limit: None,
            default_headers: StringMap::new(),
            user_agent: client.user_agent,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

impl From<&ClientConfig> for HttpClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout(),
            rate_limit: config
                .requests_per_second
                .map(RateLimiterConfig::per_second),
            default_headers: StringMap::new(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// One successfully fetched page
#[derive(Debug, Clone)]
pub struct Page {
    /// HTTP status (always 200)
    pub status: u16,
    /// Parsed JSON body
    pub body: Value,
    /// Relations advertised in the Link header
    pub links: LinkSet,
}

impl Page {
    /// Number of items on this page (1 for a non-array body)
    pub fn item_count(&self) -> usize {
        self.body.as_array().map_or(1, Vec::len)
    }
}

/// HTTP client issuing JSON GETs
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Fetch one page and parse its body and Link header
    pub async fn get_page(&self, url: &str) -> Result<Page> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url).header(ACCEPT, ACCEPT_JSON);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            debug!("GET {} returned {}", redact(url), status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        let links = extract_links(response.headers())?;
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        Ok(Page {
            status: status.as_u16(),
            body,
            links,
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Parse every Link header line on the response as one list
fn extract_links(headers: &HeaderMap) -> Result<LinkSet> {
    let values = headers
        .get_all(LINK)
        .iter()
        .map(|value| {
            value
                .to_str()
                .map_err(|_| Error::link_header(String::from_utf8_lossy(value.as_bytes())))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Ok(LinkSet::new());
    }
    parse_link_header(&values.join(","))
}

/// Strip the query string so tokens never reach the logs
pub(crate) fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
