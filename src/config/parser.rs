use crate::config::types::Config;
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use rival_watch::config::load_config;
///
/// let config = load_config(Path::new("sources.toml")).unwrap();
/// println!("Sources: {}", config.sources.len());
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}
