//! URL handling module for Rival-Watch
//!
//! This module provides fragment stripping, order-preserving deduplication,
//! relative-link resolution against a source's base URL, host extraction and
//! the anchored include patterns that decide which links are articles.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, parse_http_url};
pub use matcher::IncludePattern;
pub use normalize::{dedup_preserving_order, join_base, normalize_links, resolve_href, strip_fragment};
