//! Crawl coordination - the wave dispatcher and retry phase
//!
//! The coordinator drives the crawl one wave at a time: every URL in the
//! current wave is fetched through a bounded pool of concurrent tasks, the
//! wave's results are collected at a barrier, and the union of newly
//! discovered eligible links becomes the next wave. When no wave produces
//! new URLs, a bounded number of retry passes replays the URLs that failed
//! transiently. Per-URL errors never abort a wave or the crawl.

use crate::config::Config;
use crate::crawler::fetcher::LinkExtractor;
use crate::frontier::Frontier;
use crate::url::{evaluate, extract_host, Eligibility};
use crate::{HostboundError, UrlError};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Outcome of a completed crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// The seed URL the crawl started from
    pub seed: String,

    /// All successfully visited URLs, sorted
    pub visited: Vec<String>,

    /// URLs that kept failing transiently after the retry budget ran out
    pub abandoned: Vec<String>,

    /// Number of dispatched waves, retry passes included
    pub waves: u32,

    /// Number of retry passes that actually ran
    pub retry_passes: u32,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// Drives the level-synchronous crawl over a [`LinkExtractor`]
pub struct Coordinator<E> {
    config: Config,
    extractor: E,
    frontier: Frontier,
    shutdown: Arc<AtomicBool>,
}

impl<E: LinkExtractor> Coordinator<E> {
    pub fn new(config: Config, extractor: E) -> Self {
        Self {
            config,
            extractor,
            frontier: Frontier::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the flag that stops the crawl at the next dispatch point.
    ///
    /// Setting it never cancels in-flight fetches; they finish or time out
    /// and the current wave drains normally.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Runs the crawl to completion and returns the final report
    ///
    /// 1. Dispatch waves until one discovers no new URLs.
    /// 2. Replay transient failures for up to `max_retries` passes; links
    ///    discovered by a successful retry are crawled as ordinary waves
    ///    before the next pass.
    /// 3. Consume the frontier into the report.
    pub async fn run(self, seed: &str) -> Result<CrawlReport, HostboundError> {
        let seed_url =
            Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
        let origin_host =
            extract_host(&seed_url).ok_or_else(|| UrlError::MissingHost(seed.to_string()))?;

        tracing::info!(seed = %seed_url, host = %origin_host, "starting crawl");
        let started = Instant::now();
        let mut waves = 0u32;

        let mut wave: Vec<String> = vec![seed_url.to_string()];
        while !wave.is_empty() && !self.shutdown_requested() {
            waves += 1;
            tracing::debug!(wave = waves, urls = wave.len(), "dispatching wave");
            wave = self.run_wave(&wave, &origin_host).await;
        }

        let mut retry_passes = 0u32;
        while retry_passes < self.config.crawler.max_retries && !self.shutdown_requested() {
            let batch = self.frontier.take_retry_batch();
            if batch.is_empty() {
                break;
            }

            retry_passes += 1;
            waves += 1;
            tracing::info!(
                pass = retry_passes,
                urls = batch.len(),
                "retrying transient failures"
            );

            // A page that succeeds on retry yields fresh links; drain those
            // as normal waves before the next retry pass.
            let mut discovered = self.run_wave(&batch, &origin_host).await;
            while !discovered.is_empty() && !self.shutdown_requested() {
                waves += 1;
                discovered = self.run_wave(&discovered, &origin_host).await;
            }
        }

        let elapsed = started.elapsed();
        if self.shutdown_requested() {
            tracing::warn!("crawl stopped by shutdown request");
        }

        let summary = self.frontier.finish();
        tracing::info!(
            visited = summary.visited.len(),
            abandoned = summary.abandoned.len(),
            waves,
            ?elapsed,
            "crawl complete"
        );

        Ok(CrawlReport {
            seed: seed_url.to_string(),
            visited: summary.visited,
            abandoned: summary.abandoned,
            waves,
            retry_passes,
            elapsed,
        })
    }

    /// Fetches one wave of URLs with bounded concurrency and returns the
    /// union of newly discovered eligible links.
    async fn run_wave(&self, urls: &[String], origin_host: &str) -> Vec<String> {
        let results = stream::iter(urls)
            .map(|url| self.crawl_one(url, origin_host))
            .buffer_unordered(self.config.crawler.max_concurrent_fetches as usize)
            .collect::<Vec<HashSet<String>>>()
            .await;

        // The collect above is the wave barrier: the next wave is computed
        // only after every fetch in this one has finished.
        let mut next: HashSet<String> = HashSet::new();
        for links in results {
            next.extend(links);
        }
        next.into_iter().collect()
    }

    /// Claims, filters, fetches, and classifies a single URL.
    ///
    /// Returns the eligible outbound links on success, an empty set in
    /// every other case.
    async fn crawl_one(&self, url: &str, origin_host: &str) -> HashSet<String> {
        if self.shutdown_requested() {
            return HashSet::new();
        }

        // Losing the claim means another worker covers this URL.
        if !self.frontier.try_claim(url) {
            tracing::trace!(%url, "already covered");
            return HashSet::new();
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(%url, error = %e, "dropping unparseable url");
                self.frontier.release(url);
                return HashSet::new();
            }
        };

        if let Eligibility::Skip(reason) =
            evaluate(url, origin_host, &self.config.filter.denied_extensions)
        {
            tracing::trace!(%url, ?reason, "url not eligible");
            self.frontier.release(url);
            return HashSet::new();
        }

        match self.extractor.fetch(&parsed).await {
            Ok(links) => {
                self.frontier.mark_visited(url);
                tracing::info!(%url, outbound = links.len(), "visited");

                let mut found = HashSet::new();
                for link in links {
                    if self.frontier.is_visited(&link) {
                        continue;
                    }
                    match evaluate(&link, origin_host, &self.config.filter.denied_extensions) {
                        Eligibility::Eligible => {
                            found.insert(link);
                        }
                        Eligibility::Skip(reason) => {
                            tracing::trace!(url = %link, ?reason, "link skipped");
                        }
                    }
                }
                found
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(%url, error = %e, "transient failure, queued for retry");
                self.frontier.mark_for_retry(url);
                HashSet::new()
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "permanent failure, dropped");
                self.frontier.release(url);
                HashSet::new()
            }
        }
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
