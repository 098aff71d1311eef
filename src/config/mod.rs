//! Configuration module for Rival-Watch
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and resolving the configured competitor sites into crawlable [`Source`]s.
//!
//! # Example
//!
//! ```no_run
//! use rival_watch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sources.toml")).unwrap();
//! for source in config.resolved_sources().unwrap() {
//!     println!("{} -> {}", source.name, source.listing_url);
//! }
//! ```

mod parser;
mod source;
mod types;
mod validation;

// Re-export types
pub use source::{Source, DEFAULT_INCLUDE_REGEX};
pub use types::{Config, CrawlerConfig, OutputConfig, SourceEntry, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
