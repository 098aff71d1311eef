//! Listing page link extraction
//!
//! A listing page is an HTML page enumerating a competitor's articles. Every
//! `<a href>` on it is a candidate:
//! - root-relative hrefs (`/news/a`) are prefixed with the source base URL
//! - other forms are kept as written
//! - the result must match the include pattern from its first character
//! - fragments are stripped and duplicates dropped, first occurrence kept

use crate::url::{normalize_links, resolve_href, IncludePattern};
use scraper::{Html, Selector};

/// Extracts article links from a listing page
///
/// # Arguments
///
/// * `html` - The listing page body
/// * `include` - Pattern an article URL must match
/// * `base_url` - Prefix for root-relative hrefs
///
/// # Example
///
/// ```
/// use rival_watch::crawler::extract_listing_links;
/// use rival_watch::url::IncludePattern;
///
/// let html = r#"<a href="/news/a">A</a><a href="/about">About</a>"#;
/// let include = IncludePattern::new(r"https://acme\.example/news/").unwrap();
/// let links = extract_listing_links(html, &include, "https://acme.example");
/// assert_eq!(links, vec!["https://acme.example/news/a"]);
/// ```
pub fn extract_listing_links(html: &str, include: &IncludePattern, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let matched = document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| resolve_href(href, base_url))
        .filter(|url| include.matches(url));

    normalize_links(matched)
}

/// Drops links pointing back at the listing page itself
///
/// Comparison ignores the fragment and a trailing slash.
pub fn exclude_self_links(links: Vec<String>, listing_url: &str) -> Vec<String> {
    let own = comparable(listing_url);
    links
        .into_iter()
        .filter(|link| comparable(link) != own)
        .collect()
}

fn comparable(url: &str) -> &str {
    crate::url::strip_fragment(url).trim_end_matches('/')
}
