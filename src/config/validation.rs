use crate::config::source::Source;
use crate::config::types::{Config, CrawlerConfig, OutputConfig, SourceEntry, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_sources(&config.sources)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.request_timeout_secs
    {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and request_timeout_secs ({}), got {}",
            config.request_timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_sitemap_urls < 1 {
        return Err(ConfigError::Validation(format!(
            "max_sitemap_urls must be >= 1, got {}",
            config.max_sitemap_urls
        )));
    }

    if config.max_sitemap_depth < 1 || config.max_sitemap_depth > 16 {
        return Err(ConfigError::Validation(format!(
            "max_sitemap_depth must be between 1 and 16, got {}",
            config.max_sitemap_depth
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.seen_path.is_empty() {
        return Err(ConfigError::Validation(
            "seen_path cannot be empty".to_string(),
        ));
    }

    if config.posts_path.is_empty() {
        return Err(ConfigError::Validation(
            "posts_path cannot be empty".to_string(),
        ));
    }

    if config.seen_path == config.posts_path {
        return Err(ConfigError::Validation(
            "seen_path and posts_path must point to different files".to_string(),
        ));
    }

    Ok(())
}

/// Validates source entries: names, URLs and include patterns
fn validate_sources(sources: &[SourceEntry]) -> ConfigResult<()> {
    let mut names = HashSet::new();

    for entry in sources {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Source with listing-url '{}' has an empty name",
                entry.listing_url
            )));
        }

        if !names.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate source name '{}'",
                entry.name
            )));
        }

        // Resolution parses the URLs and compiles the pattern
        Source::try_from(entry)?;
    }

    Ok(())
}
