//! Sitemap resolution
//!
//! Turns a site into a flat list of page URLs by walking its sitemaps:
//! 1. Discover candidates (robots.txt `Sitemap:` lines, then well-known paths)
//! 2. Walk each candidate depth-first through sitemap indexes, decompressing
//!    `.gz` sitemaps, under a URL budget, a depth cap and a visited set
//! 3. Keep the first candidate whose URLs match the source's include pattern
//!
//! Nothing in here fails the crawl: an unreachable, compressed-but-corrupt or
//! malformed sitemap simply contributes no URLs.

mod discovery;
mod parser;

pub use discovery::{candidate_sitemaps, discover_sitemaps, WELL_KNOWN_SITEMAPS};
pub use parser::{decompress_gzip, parse_sitemap_document, SitemapDocument};

use crate::config::CrawlerConfig;
use crate::crawler::{FetchError, Fetcher};
use crate::url::{dedup_preserving_order, normalize_links, IncludePattern};
use std::collections::HashSet;
use thiserror::Error;

/// Why a single sitemap yielded nothing
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("gzip decompression failed: {0}")]
    Gzip(std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document ended with unclosed elements")]
    Truncated,

    #[error("document has no root element")]
    NoRootElement,
}

/// Walks sitemap trees under a URL budget
#[derive(Debug, Clone, Copy)]
pub struct SitemapResolver {
    max_urls: usize,
    max_depth: usize,
}

impl SitemapResolver {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `max_urls` - Maximum URLs collected from one candidate sitemap tree
    /// * `max_depth` - Number of sitemap levels walked, counting the starting one
    pub fn new(max_urls: usize, max_depth: usize) -> Self {
        Self {
            max_urls,
            max_depth,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.max_sitemap_urls, config.max_sitemap_depth)
    }

    /// Collects page URLs reachable from one sitemap
    ///
    /// Child sitemaps of an index are visited in document order. The walk
    /// stops once `max_urls` URLs are collected, and no sitemap URL is
    /// fetched twice, so self-referencing or mutually-referencing indexes
    /// terminate. The result is deduplicated, first occurrence kept.
    pub async fn parse_sitemap(&self, fetcher: &Fetcher, sitemap_url: &str) -> Vec<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut urls: Vec<String> = Vec::new();
        let mut pending: Vec<(String, usize)> = vec![(sitemap_url.to_string(), 0)];

        while let Some((url, depth)) = pending.pop() {
            if urls.len() >= self.max_urls {
                break;
            }

            if !visited.insert(url.clone()) {
                tracing::debug!("Sitemap {} already visited, skipping", url);
                continue;
            }

            let document = match load_document(fetcher, &url).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::debug!("Sitemap {} yielded nothing: {}", url, e);
                    continue;
                }
            };

            match document {
                SitemapDocument::Index(children) => {
                    if depth + 1 >= self.max_depth {
                        tracing::debug!(
                            "Sitemap index {} exceeds depth {}, not expanding",
                            url,
                            self.max_depth
                        );
                        continue;
                    }
                    // Reversed so the first child is popped first
                    for child in children.into_iter().rev() {
                        pending.push((child, depth + 1));
                    }
                }
                SitemapDocument::UrlSet(locs) => {
                    let room = self.max_urls - urls.len();
                    urls.extend(locs.into_iter().take(room));
                }
                SitemapDocument::Other => {
                    tracing::debug!("Sitemap {} has an unrecognized root element", url);
                }
            }
        }

        dedup_preserving_order(urls)
    }

    /// Finds article links for a site through its sitemaps
    ///
    /// Candidates are tried in discovery order; the first one with at least
    /// one URL matching `include` wins and later candidates are not fetched.
    /// Returned URLs are fragment-stripped and deduplicated.
    pub async fn links_from_sitemaps(
        &self,
        fetcher: &Fetcher,
        base_url: &str,
        include: &IncludePattern,
    ) -> Vec<String> {
        for candidate in discover_sitemaps(fetcher, base_url).await {
            let matched: Vec<String> = self
                .parse_sitemap(fetcher, &candidate)
                .await
                .into_iter()
                .filter(|url| include.matches(url))
                .collect();

            if !matched.is_empty() {
                tracing::debug!(
                    "Sitemap {} yielded {} matching URL(s)",
                    candidate,
                    matched.len()
                );
                return normalize_links(matched);
            }
        }

        Vec::new()
    }
}

/// Fetches, optionally gunzips, and parses one sitemap
async fn load_document(fetcher: &Fetcher, url: &str) -> Result<SitemapDocument, SitemapError> {
    let mut bytes = fetcher.fetch_bytes(url).await?;

    if url.ends_with(".gz") {
        bytes = decompress_gzip(&bytes)?;
    }

    parse_sitemap_document(&bytes)
}
