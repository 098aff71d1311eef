use crate::crawler::Fetcher;
use crate::robots::fetch_sitemap_directives;
use crate::url::{dedup_preserving_order, join_base};

/// Sitemap locations tried on every site, after any robots.txt entries
pub const WELL_KNOWN_SITEMAPS: [&str; 4] = [
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap.xml.gz",
    "/sitemap-index.xml",
];

/// Orders candidate sitemap URLs: robots.txt entries first, then the
/// well-known paths under `base_url`, without duplicates
pub fn candidate_sitemaps(robots_entries: Vec<String>, base_url: &str) -> Vec<String> {
    let well_known = WELL_KNOWN_SITEMAPS
        .iter()
        .map(|path| join_base(base_url, path));

    dedup_preserving_order(robots_entries.into_iter().chain(well_known))
}

/// Discovers every sitemap worth trying for a site
pub async fn discover_sitemaps(fetcher: &Fetcher, base_url: &str) -> Vec<String> {
    let robots_entries = fetch_sitemap_directives(fetcher, base_url).await;
    candidate_sitemaps(robots_entries, base_url)
}
