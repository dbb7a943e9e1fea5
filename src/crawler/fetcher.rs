//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests returning the page body
//! - Classifying non-2xx responses as transport failures
//! - Pacing every request through the shared limiter
//!
//! The crawl never retries; any failure here ends the run.

use crate::config::UserAgentConfig;
use crate::crawler::pacer::Pacer;
use crate::CrawlError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Source of raw page content
///
/// Implemented over HTTP for real crawls and over canned pages in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url`, or a transport error
    async fn fetch(&self, url: &str) -> Result<String, CrawlError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout_secs` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use paper_trail::config::UserAgentConfig;
/// use paper_trail::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "PaperTrail".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, 30).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout_secs: u64) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| CrawlError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Wraps a fetcher so that every request waits on the shared pacer
///
/// The delay counts from the end of the previous response as well as from
/// the start of the previous request.
#[derive(Clone)]
pub struct PacedFetcher {
    inner: Arc<dyn PageFetcher>,
    pacer: Arc<Pacer>,
}

impl PacedFetcher {
    pub fn new(inner: Arc<dyn PageFetcher>, pacer: Arc<Pacer>) -> Self {
        Self { inner, pacer }
    }
}

#[async_trait]
impl PageFetcher for PacedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        self.pacer.wait().await;
        tracing::debug!("GET {}", url);
        let outcome = self.inner.fetch(url).await;
        self.pacer.release().await;
        outcome
    }
}
