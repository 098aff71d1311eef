//! Per-source link discovery
//!
//! The listing page is tried first. Only when it cannot be fetched or yields
//! no candidate does the sitemap resolver run, once.

use crate::config::Source;
use crate::crawler::listing::{exclude_self_links, extract_listing_links};
use crate::crawler::Fetcher;
use crate::sitemap::SitemapResolver;
use serde::Serialize;
use std::fmt;

/// Which strategy produced a source's frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    Listing,
    Sitemap,
    /// Neither strategy found anything
    None,
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiscoveryStrategy::Listing => "listing",
            DiscoveryStrategy::Sitemap => "sitemap",
            DiscoveryStrategy::None => "none",
        };
        f.write_str(name)
    }
}

/// Candidate article URLs for one source, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    pub links: Vec<String>,
    pub strategy: DiscoveryStrategy,
}

/// Discovers candidate article links for a source
pub async fn discover_links(
    fetcher: &Fetcher,
    resolver: &SitemapResolver,
    source: &Source,
) -> DiscoveryOutcome {
    let listed = match fetcher.fetch_text(&source.listing_url).await {
        Ok(html) => {
            let links = extract_listing_links(&html, &source.include, &source.base_url);
            exclude_self_links(links, &source.listing_url)
        }
        Err(e) => {
            tracing::warn!(source = %source.name, "Cannot fetch listing page: {}", e);
            Vec::new()
        }
    };

    if !listed.is_empty() {
        tracing::info!(
            source = %source.name,
            "Found {} candidate link(s) via listing page",
            listed.len()
        );
        return DiscoveryOutcome {
            links: listed,
            strategy: DiscoveryStrategy::Listing,
        };
    }

    tracing::info!(
        source = %source.name,
        "Listing page yielded no candidates, trying sitemaps"
    );
    let mapped = resolver
        .links_from_sitemaps(fetcher, &source.base_url, &source.include)
        .await;

    if mapped.is_empty() {
        tracing::info!(source = %source.name, "No candidate links discovered");
        return DiscoveryOutcome {
            links: mapped,
            strategy: DiscoveryStrategy::None,
        };
    }

    tracing::info!(
        source = %source.name,
        "Found {} candidate link(s) via sitemap",
        mapped.len()
    );
    DiscoveryOutcome {
        links: mapped,
        strategy: DiscoveryStrategy::Sitemap,
    }
}
