use crate::url::domain::extract_host;
use url::Url;

/// Outcome of the eligibility filter for a discovered URL
///
/// Explicit sum type consumed by branching in the coordinator; a skipped
/// URL is never fetched and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The URL may be crawled
    Eligible,
    /// The URL must not be crawled
    Skip(SkipReason),
}

/// Why a URL was rejected by the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL could not be parsed
    Malformed,
    /// The URL carries a fragment (`#...`); the fragment-free page covers it
    Fragment,
    /// The path extension is on the denylist
    DeniedExtension(String),
    /// The host differs from the origin host (or is absent)
    ForeignHost,
}

/// Applies the stateless eligibility rules to a candidate URL
///
/// All rules must pass:
/// - the URL parses,
/// - it has no fragment,
/// - its path extension is not on the denylist,
/// - its host equals `origin_host` case-insensitively.
///
/// The visited-set check is the frontier's job, not the filter's.
///
/// # Arguments
///
/// * `candidate` - The absolute URL discovered in page content
/// * `origin_host` - Lowercased host of the page the link was found on
/// * `denied_extensions` - Lowercase extensions that are never crawled
pub fn evaluate(candidate: &str, origin_host: &str, denied_extensions: &[String]) -> Eligibility {
    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return Eligibility::Skip(SkipReason::Malformed),
    };

    if url.fragment().is_some() {
        return Eligibility::Skip(SkipReason::Fragment);
    }

    if let Some(ext) = path_extension(&url) {
        if denied_extensions.iter().any(|denied| *denied == ext) {
            return Eligibility::Skip(SkipReason::DeniedExtension(ext));
        }
    }

    match extract_host(&url) {
        Some(host) if host == origin_host => Eligibility::Eligible,
        _ => Eligibility::Skip(SkipReason::ForeignHost),
    }
}

/// Extracts the extension from a URL path
///
/// The extension is the substring after the final `.` in the path, with any
/// trailing `/` stripped and lowercased. A path with no `.` has no
/// extension.
fn path_extension(url: &Url) -> Option<String> {
    url.path()
        .rsplit_once('.')
        .map(|(_, tail)| tail.trim_end_matches('/').to_ascii_lowercase())
}
