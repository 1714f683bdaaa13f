//! Hostbound: a bounded same-host link crawler
//!
//! Given a seed URL, this crate discovers every reachable page on the same
//! host by following hyperlinks wave by wave, deduplicating visited pages,
//! and retrying pages that failed with transient network errors.

pub mod config;
pub mod crawler;
pub mod frontier;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for hostbound operations
#[derive(Debug, Error)]
pub enum HostboundError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for hostbound operations
pub type Result<T> = std::result::Result<T, HostboundError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport};
pub use frontier::Frontier;
pub use url::{extract_host, Eligibility, SkipReason};
