//! HTTP page fetch adapter
//!
//! This module is the crawl's only contact with the network. It wraps a
//! reqwest client with the policy knobs the pipeline passes in:
//! - user agent and per-request timeouts
//! - a parallelism cap on in-flight requests
//! - an optional fixed delay plus random jitter before each request
//! - a host allow-list

use crate::config::FetchConfig;
use crate::{DinemapError, Result};
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Builds an HTTP client from the fetch configuration
///
/// # Arguments
///
/// * `config` - The fetch policy configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher with bounded parallelism and optional request pacing
pub struct Fetcher {
    client: Client,
    permits: Semaphore,
    allowed_hosts: Vec<String>,
    delay: Duration,
    jitter_ms: u64,
}

impl Fetcher {
    /// Creates a fetcher that runs requests back to back (no pacing delay)
    ///
    /// Used for listing walks; only detail fetches are rate limited.
    pub fn new(config: &FetchConfig) -> std::result::Result<Self, reqwest::Error> {
        Self::build(config, Duration::ZERO, 0)
    }

    /// Creates a fetcher that pauses before each request
    ///
    /// Applies the configured fixed delay plus a random jitter between zero
    /// and `detail-jitter-ms`. Used for entity detail fetches.
    pub fn with_pacing(config: &FetchConfig) -> std::result::Result<Self, reqwest::Error> {
        Self::build(
            config,
            Duration::from_millis(config.detail_delay_ms),
            config.detail_jitter_ms,
        )
    }

    fn build(
        config: &FetchConfig,
        delay: Duration,
        jitter_ms: u64,
    ) -> std::result::Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            permits: Semaphore::new(config.parallelism as usize),
            allowed_hosts: config
                .allowed_hosts
                .iter()
                .map(|h| h.to_lowercase())
                .collect(),
            delay,
            jitter_ms,
        })
    }

    /// Fetches a page and returns its body
    ///
    /// Blocks until a parallelism permit is available, applies the pacing
    /// delay, then issues a GET. Non-2xx responses are errors.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The response body
    /// * `Err(DinemapError)` - Disallowed host, network failure, or HTTP error
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        self.check_host(url)?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DinemapError::Interrupted)?;

        self.pause().await;

        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| DinemapError::Http {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| DinemapError::Http {
            url: url.to_string(),
            source,
        })
    }

    /// Rejects URLs whose host is outside the allow-list
    ///
    /// An empty allow-list permits every host.
    fn check_host(&self, url: &str) -> Result<()> {
        if self.allowed_hosts.is_empty() {
            return Ok(());
        }

        let parsed = Url::parse(url)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| DinemapError::HostNotAllowed {
                url: url.to_string(),
            })?
            .to_lowercase();

        if self.allowed_hosts.iter().any(|h| *h == host) {
            Ok(())
        } else {
            Err(DinemapError::HostNotAllowed {
                url: url.to_string(),
            })
        }
    }

    async fn pause(&self) {
        let jitter = if self.jitter_ms > 0 {
            Duration::from_millis(rand::rng().random_range(0..=self.jitter_ms))
        } else {
            Duration::ZERO
        };

        let wait = self.delay + jitter;
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;

    fn test_fetch_config() -> FetchConfig {
        FetchConfig {
            user_agent: "test-agent".to_string(),
            parallelism: 5,
            request_timeout_secs: 30,
            detail_delay_ms: 0,
            detail_jitter_ms: 0,
            allowed_hosts: vec![],
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = test_fetch_config();
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_allowed_host_accepted() {
        let mut config = test_fetch_config();
        config.allowed_hosts = vec!["www.example.com".to_string()];
        let fetcher = Fetcher::new(&config).unwrap();

        assert!(fetcher.check_host("https://www.example.com/page").is_ok());
    }

    #[tokio::test]
    async fn test_disallowed_host_rejected() {
        let mut config = test_fetch_config();
        config.allowed_hosts = vec!["www.example.com".to_string()];
        let fetcher = Fetcher::new(&config).unwrap();

        let result = fetcher.check_host("https://evil.example.net/page");
        assert!(matches!(result, Err(DinemapError::HostNotAllowed { .. })));
    }

    #[tokio::test]
    async fn test_empty_allow_list_accepts_any_host() {
        let fetcher = Fetcher::new(&test_fetch_config()).unwrap();
        assert!(fetcher.check_host("https://anything.example.org/").is_ok());
    }

    #[tokio::test]
    async fn test_host_comparison_is_case_insensitive() {
        let mut config = test_fetch_config();
        config.allowed_hosts = vec!["WWW.Example.COM".to_string()];
        let fetcher = Fetcher::new(&config).unwrap();

        assert!(fetcher.check_host("https://www.example.com/").is_ok());
    }
}
