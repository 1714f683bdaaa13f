//! Frontier state: visited, retry, and in-flight URL sets
//!
//! The frontier is the only shared mutable state in the crawl. Many fetch
//! workers call into it concurrently, so every operation takes the internal
//! mutex, mutates, and releases before any await point. A URL that entered
//! the visited set is never fetched again; `https://x.com` and
//! `https://x.com/` count as the same entry.

use std::collections::HashSet;
use std::sync::Mutex;

/// Tracks which URLs have been visited, which are awaiting retry, and which
/// are currently claimed by an in-flight worker.
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<FrontierState>,
}

#[derive(Debug, Default)]
struct FrontierState {
    visited: HashSet<String>,
    retrying: HashSet<String>,
    in_flight: HashSet<String>,
}

/// Final frontier contents after a crawl
#[derive(Debug)]
pub struct FrontierSummary {
    /// All successfully visited URLs, sorted
    pub visited: Vec<String>,
    /// Transient failures left behind after the retry budget ran out, sorted
    pub abandoned: Vec<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically checks visited state and, if the URL is unclaimed,
    /// reserves it for the calling worker.
    ///
    /// Returns false when the URL (or its slash twin) was already visited,
    /// or when another worker in the same wave holds the claim on either
    /// variant. The loser treats the URL as covered.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut state = self.inner.lock().unwrap();
        if state.is_visited(url) || contains_twin(&state.in_flight, url) {
            return false;
        }
        state.in_flight.insert(url.to_string());
        true
    }

    /// Records a successful visit: the URL enters the visited set and leaves
    /// the retry and in-flight sets.
    pub fn mark_visited(&self, url: &str) {
        let mut state = self.inner.lock().unwrap();
        remove_twins(&mut state.in_flight, url);
        remove_twins(&mut state.retrying, url);
        if !state.is_visited(url) {
            state.visited.insert(url.to_string());
        }
    }

    /// Records a transient failure: the URL enters the retry set (idempotent)
    /// and releases its claim so a later retry pass can claim it again.
    pub fn mark_for_retry(&self, url: &str) {
        let mut state = self.inner.lock().unwrap();
        remove_twins(&mut state.in_flight, url);
        if !state.is_visited(url) && !contains_twin(&state.retrying, url) {
            state.retrying.insert(url.to_string());
        }
    }

    /// Drops a claim without visiting. Used when a fetch fails permanently
    /// or the URL turns out to be ineligible after claiming.
    pub fn release(&self, url: &str) {
        let mut state = self.inner.lock().unwrap();
        remove_twins(&mut state.in_flight, url);
    }

    /// Returns true when the URL or its slash twin has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.inner.lock().unwrap().is_visited(url)
    }

    /// Drains the retry set for one retry pass. URLs that fail again will
    /// re-enter the set through `mark_for_retry`.
    pub fn take_retry_batch(&self) -> Vec<String> {
        let mut state = self.inner.lock().unwrap();
        state.retrying.drain().collect()
    }

    pub fn visited_count(&self) -> usize {
        self.inner.lock().unwrap().visited.len()
    }

    pub fn retry_count(&self) -> usize {
        self.inner.lock().unwrap().retrying.len()
    }

    /// Consumes the frontier into its final sorted contents
    pub fn finish(self) -> FrontierSummary {
        let state = self.inner.into_inner().unwrap();
        let mut visited: Vec<String> = state.visited.into_iter().collect();
        let mut abandoned: Vec<String> = state.retrying.into_iter().collect();
        visited.sort();
        abandoned.sort();
        FrontierSummary { visited, abandoned }
    }
}

impl FrontierState {
    /// Checks both slash variants so `https://x.com` and `https://x.com/`
    /// resolve to the same visited entry.
    fn is_visited(&self, url: &str) -> bool {
        contains_twin(&self.visited, url)
    }
}

/// True when the set holds the URL or its trailing-slash twin
fn contains_twin(set: &HashSet<String>, url: &str) -> bool {
    if set.contains(url) {
        return true;
    }
    match url.strip_suffix('/') {
        Some(trimmed) => set.contains(trimmed),
        None => set.contains(&format!("{}/", url)),
    }
}

/// Removes the URL and its trailing-slash twin from the set
fn remove_twins(set: &mut HashSet<String>, url: &str) {
    set.remove(url);
    match url.strip_suffix('/') {
        Some(trimmed) => {
            set.remove(trimmed);
        }
        None => {
            set.remove(&format!("{}/", url));
        }
    }
}
