//! Resolved crawl sources
//!
//! A [`SourceEntry`] is what the user wrote; a [`Source`] is what the crawler
//! works with: defaults applied and the include pattern compiled.

use crate::config::types::{Config, SourceEntry};
use crate::url::{parse_http_url, IncludePattern};
use crate::{ConfigError, ConfigResult};

/// Pattern used when a source does not restrict its article URLs
pub const DEFAULT_INCLUDE_REGEX: &str = ".*";

/// One configured competitor site, immutable for the duration of a run
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub listing_url: String,
    pub base_url: String,
    pub include: IncludePattern,
}

impl Source {
    /// Builds a source directly, compiling its include pattern
    pub fn new(
        name: impl Into<String>,
        listing_url: impl Into<String>,
        base_url: impl Into<String>,
        include_url_regex: &str,
    ) -> ConfigResult<Self> {
        Ok(Self {
            name: name.into(),
            listing_url: listing_url.into(),
            base_url: base_url.into(),
            include: IncludePattern::new(include_url_regex)?,
        })
    }
}

impl TryFrom<&SourceEntry> for Source {
    type Error = ConfigError;

    fn try_from(entry: &SourceEntry) -> Result<Self, Self::Error> {
        let listing = parse_http_url(&entry.listing_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid listing-url for source '{}': {}",
                entry.name, e
            ))
        })?;

        let base_url = match &entry.base_url {
            Some(base) => {
                parse_http_url(base).map_err(|e| {
                    ConfigError::InvalidUrl(format!(
                        "Invalid base-url for source '{}': {}",
                        entry.name, e
                    ))
                })?;
                base.clone()
            }
            None => listing.origin().ascii_serialization(),
        };

        let regex = entry
            .include_url_regex
            .as_deref()
            .unwrap_or(DEFAULT_INCLUDE_REGEX);

        Source::new(entry.name.clone(), entry.listing_url.clone(), base_url, regex)
    }
}

impl Config {
    /// Resolves every configured source, in configuration order
    pub fn resolved_sources(&self) -> ConfigResult<Vec<Source>> {
        self.sources.iter().map(Source::try_from).collect()
    }
}
