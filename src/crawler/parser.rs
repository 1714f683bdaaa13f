//! HTML link extraction
//!
//! Pulls the outbound link set out of a fetched page: every `<a href>` is
//! resolved against the page URL into an absolute URL. Non-navigational
//! schemes and fragment-only anchors are dropped here; everything else is
//! the eligibility filter's problem.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the set of absolute outbound URLs from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used to resolve relative links
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            // Skip links that trigger a download rather than navigation
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL and validates it
///
/// Returns None for hrefs that should be excluded:
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - fragment-only anchors (same-page jumps)
/// - invalid URLs and non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
