use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the lowercase host from a URL string
///
/// Used to key per-host politeness. Returns None for strings that do not
/// parse as absolute URLs or have no host.
///
/// # Examples
///
/// ```
/// use rival_watch::url::extract_host;
///
/// assert_eq!(extract_host("https://EXAMPLE.com/path"), Some("example.com".to_string()));
/// assert_eq!(extract_host("not a url"), None);
/// ```
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Parses a URL and requires an http(s) scheme and a host
pub fn parse_http_url(url: &str) -> UrlResult<Url> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(parsed)
}
