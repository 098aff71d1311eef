//! Rival-Watch: competitor content ingestion
//!
//! This crate turns a small set of configured competitor sites into article
//! records. Each source is discovered through its HTML listing page, falling
//! back to its XML sitemaps, and every new article is fetched, reduced to its
//! main text and appended to a tabular post dataset.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod sitemap;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Rival-Watch operations
#[derive(Debug, Error)]
pub enum RivalError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid include pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Rival-Watch operations
pub type Result<T> = std::result::Result<T, RivalError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, Source};
pub use crawler::{run_crawl, Coordinator, CrawlReport};
pub use storage::{ArticleRecord, SeenUrls};
pub use crate::url::{normalize_links, strip_fragment, IncludePattern};
