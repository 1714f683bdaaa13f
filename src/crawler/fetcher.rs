//! HTTP fetching and fetch-error classification
//!
//! The coordinator talks to the network through the [`LinkExtractor`]
//! trait: fetch a page, come back with its outbound link set or a
//! classified error. [`HttpLinkExtractor`] is the production
//! implementation on top of reqwest and the HTML parser; tests substitute
//! scripted implementations.

use crate::config::CrawlerConfig;
use crate::crawler::parser::extract_links;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Classified failure of a single fetch
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request or connection timed out; eligible for retry
    #[error("request timed out")]
    Timeout,

    /// The connection was refused; eligible for retry
    #[error("connection refused")]
    ConnectionRefused,

    /// Any other failure (HTTP error status, non-HTML content, protocol
    /// error); the URL is abandoned
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// True for failures presumed recoverable by retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Timeout | FetchError::ConnectionRefused)
    }
}

/// External collaborator that fetches a page and returns its outbound links
///
/// Per-URL failures are fully contained in the returned error; an
/// implementation must never panic the wave.
pub trait LinkExtractor: Send + Sync {
    fn fetch(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<HashSet<String>, FetchError>> + Send;
}

/// Builds the HTTP client used by [`HttpLinkExtractor`]
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production link extractor: HTTP GET plus HTML link extraction
#[derive(Debug, Clone)]
pub struct HttpLinkExtractor {
    client: Client,
}

impl HttpLinkExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl LinkExtractor for HttpLinkExtractor {
    async fn fetch(&self, url: &Url) -> Result<HashSet<String>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Other(format!("HTTP {}", status.as_u16())));
        }

        // Content-type backstop: the extension denylist catches most
        // non-HTML URLs before they are fetched, but servers do not have to
        // put the type in the path.
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(FetchError::Other(format!(
                "unsupported content type: {}",
                content_type
            )));
        }

        // Resolve discovered links against the final URL so redirected
        // pages resolve their relative links correctly.
        let final_url = response.url().clone();

        let body = response.text().await.map_err(classify_reqwest_error)?;

        Ok(extract_links(&body, &final_url))
    }
}

/// Maps a reqwest error onto the crawl's failure taxonomy
fn classify_reqwest_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::ConnectionRefused
    } else {
        FetchError::Other(error.to_string())
    }
}
