//! Robots.txt handling module
//!
//! robots.txt is consulted only as a source of sitemap locations. It is
//! optional: a missing or unreachable file yields no directives, never an
//! error.

mod parser;

pub use parser::parse_sitemap_directives;

use crate::crawler::Fetcher;
use crate::url::join_base;

/// Fetches `{base_url}/robots.txt` and returns its sitemap directives
///
/// # Arguments
///
/// * `fetcher` - The shared fetcher
/// * `base_url` - The site root, with or without a trailing slash
///
/// # Returns
///
/// The declared sitemap URLs in file order; empty if robots.txt could not be
/// fetched.
pub async fn fetch_sitemap_directives(fetcher: &Fetcher, base_url: &str) -> Vec<String> {
    let robots_url = join_base(base_url, "/robots.txt");

    match fetcher.fetch_text(&robots_url).await {
        Ok(content) => {
            let sitemaps = parse_sitemap_directives(&content);
            tracing::debug!("{} declares {} sitemap(s)", robots_url, sitemaps.len());
            sitemaps
        }
        Err(e) => {
            tracing::debug!("robots.txt unavailable: {}", e);
            Vec::new()
        }
    }
}
