use url::Url;

/// Extracts the host from a URL
///
/// Returns the host portion lowercased, or None when the URL has no host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use hostbound::url::extract_host;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
