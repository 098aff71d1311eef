use std::collections::HashSet;

/// Removes the fragment (everything from the first `#`) from a URL string
///
/// This is a purely textual operation: no parsing or re-serialization takes
/// place, so the rest of the URL is returned byte-for-byte.
///
/// # Examples
///
/// ```
/// use rival_watch::url::strip_fragment;
///
/// assert_eq!(strip_fragment("https://acme.example/news/a#top"), "https://acme.example/news/a");
/// assert_eq!(strip_fragment("https://acme.example/news/a"), "https://acme.example/news/a");
/// ```
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Removes exact-string duplicates, keeping the first occurrence of each
pub fn dedup_preserving_order<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for url in urls {
        if seen.insert(url.clone()) {
            out.push(url);
        }
    }

    out
}

/// Canonicalizes a sequence of discovered links
///
/// Fragments are stripped first and duplicates removed afterwards, so links
/// that differ only by fragment collapse onto the position of the first one.
///
/// # Examples
///
/// ```
/// use rival_watch::url::normalize_links;
///
/// let links = normalize_links(vec![
///     "https://acme.example/news/a".to_string(),
///     "https://acme.example/news/b".to_string(),
///     "https://acme.example/news/a#top".to_string(),
/// ]);
/// assert_eq!(links, vec!["https://acme.example/news/a", "https://acme.example/news/b"]);
/// ```
pub fn normalize_links<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    dedup_preserving_order(urls.into_iter().map(|u| strip_fragment(&u).to_string()))
}

/// Appends a root-relative path to a base URL, avoiding a doubled slash
pub fn join_base(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Resolves an anchor href against a source's base URL
///
/// Only root-relative hrefs (starting with `/`) are rewritten; every other
/// form is returned trimmed but otherwise untouched, so it only survives the
/// include filter if the pattern accepts it as written.
pub fn resolve_href(href: &str, base_url: &str) -> String {
    let href = href.trim();
    if href.starts_with('/') {
        join_base(base_url, href)
    } else {
        href.to_string()
    }
}
