use url::Url;

/// Returns the `scheme://host[:port]` origin of a URL
///
/// Explicit ports are kept so that images on a non-default port resolve to
/// the same server as the page. Default ports are already dropped by the
/// `url` crate during parsing.
///
/// # Returns
///
/// * `Some(String)` - The origin, without a trailing slash
/// * `None` - If the URL has no host (e.g. `data:` or `file:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use thumbnail_resolver::url::origin_of;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(origin_of(&url), Some("https://example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/path").unwrap();
/// assert_eq!(origin_of(&url), Some("http://127.0.0.1:8080".to_string()));
/// ```
pub fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
}
