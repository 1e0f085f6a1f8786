// src/utils/http.rs

//! HTTP client utilities.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, FetchedPage, Identifier};

/// Source of page markup.
///
/// Any failure (network error, timeout, non-2xx status) is reported as an
/// error; the crawl treats all of them the same way.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, identifier: &Identifier) -> Result<FetchedPage>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(build_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn build_headers(config: &CrawlerConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_str(name)
            .map_err(|e| AppError::config(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::config(format!("invalid value for header {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Fetches pages over HTTP with reqwest.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::with_client(create_client(config)?).with_delay(config.request_delay_ms))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            delay: Duration::ZERO,
        }
    }

    /// Sleep this many milliseconds before every request (0 disables it).
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, identifier: &Identifier) -> Result<FetchedPage> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let response = self
            .client
            .get(identifier.as_url().clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(identifier.as_str(), e))?;

        let url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(identifier.as_str(), e))?;

        Ok(FetchedPage::new(identifier.clone(), url, body))
    }
}
