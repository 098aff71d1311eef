//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent and timeouts
//! - Per-host politeness before every request
//! - GET requests for robots.txt, sitemaps, listing pages and articles
//! - Error classification (timeout, network, status)

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::throttle::HostThrottle;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch produced no body
///
/// Every variant is transient from the crawler's point of view: the caller
/// logs it and moves on to the next URL or sitemap candidate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if e.is_builder() {
            FetchError::InvalidUrl {
                url: url.to_string(),
                message: e.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeouts
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use rival_watch::config::{CrawlerConfig, UserAgentConfig};
/// use rival_watch::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "RivalWatchBot".to_string(),
///     crawler_version: "0.2.1".to_string(),
///     contact_url: "https://example.com/bot".to_string(),
/// };
///
/// let client = build_http_client(&CrawlerConfig::default(), &user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Shared HTTP access for discovery and extraction
///
/// Wraps one client and one [`HostThrottle`] so every request, whatever its
/// purpose, honors the same per-host interval.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    throttle: HostThrottle,
}

impl Fetcher {
    /// Builds a fetcher from configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(crawler, user_agent)?;
        Ok(Self::with_client(
            client,
            Duration::from_millis(crawler.politeness_delay_ms),
        ))
    }

    /// Builds a fetcher around an existing client
    pub fn with_client(client: Client, politeness: Duration) -> Self {
        Self {
            client,
            throttle: HostThrottle::new(politeness),
        }
    }

    /// Fetches a URL and returns the raw body
    ///
    /// Any non-2xx status is a failure.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.throttle.wait_turn(url).await;

        tracing::trace!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(body.to_vec())
    }

    /// Fetches a URL and decodes the body as UTF-8, replacing invalid bytes
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
