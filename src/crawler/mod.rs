//! Crawler module for discovery and article extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-host politeness
//! - Listing page link extraction and the sitemap fallback
//! - Main-content extraction from article pages
//! - Overall crawl coordination

mod article;
mod content;
mod coordinator;
mod discovery;
mod fetcher;
mod listing;
mod throttle;

pub use article::{extract_article, parse_article, passes_quality_gate, ExtractedArticle};
pub use coordinator::{run_crawl, Coordinator, CrawlReport, SourceReport};
pub use discovery::{discover_links, DiscoveryOutcome, DiscoveryStrategy};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use listing::{exclude_self_links, extract_listing_links};
pub use throttle::HostThrottle;
