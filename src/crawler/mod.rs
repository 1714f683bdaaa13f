//! Crawling core: fetching, link extraction, and wave coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, CrawlReport};
pub use fetcher::{build_http_client, FetchError, HttpLinkExtractor, LinkExtractor};
pub use parser::extract_links;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl from the seed URL and returns the report
///
/// Builds the HTTP client from the configuration, wires up the production
/// link extractor, and drives the wave coordinator to completion.
///
/// # Example
///
/// ```no_run
/// use hostbound::config::Config;
/// use hostbound::crawler::crawl;
///
/// # async fn example() -> hostbound::Result<()> {
/// let report = crawl(Config::default(), "https://example.com/").await?;
/// println!("visited {} pages", report.visited.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config, seed: &str) -> Result<CrawlReport> {
    let client = build_http_client(&config.crawler)?;
    let extractor = HttpLinkExtractor::new(client);
    Coordinator::new(config, extractor).run(seed).await
}
