use serde::Deserialize;

/// Main configuration structure for hostbound
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches per wave
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: u32,

    /// Number of retry passes over transient failures (0 disables retries)
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// URL filtering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// File extensions that are never crawled (compared case-insensitively
    /// against the path segment after the final `.`)
    #[serde(rename = "denied-extensions", default = "default_denied_extensions")]
    pub denied_extensions: Vec<String>,
}

fn default_max_concurrent() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("hostbound/{}", env!("CARGO_PKG_VERSION"))
}

fn default_denied_extensions() -> Vec<String> {
    ["pdf", "jpg", "csv", "png"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent(),
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            denied_extensions: default_denied_extensions(),
        }
    }
}
