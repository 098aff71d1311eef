use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// Pattern deciding which discovered URLs are treated as articles
///
/// Matching is anchored at the start of the URL (a prefix match, not a
/// substring search), but not at the end: `^https://a\.example/news/` accepts
/// every URL below `/news/`.
#[derive(Debug, Clone)]
pub struct IncludePattern {
    source: String,
    regex: Regex,
}

impl IncludePattern {
    /// Compiles an include pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use rival_watch::url::IncludePattern;
    ///
    /// let pattern = IncludePattern::new(r"https://acme\.example/news/").unwrap();
    /// assert!(pattern.matches("https://acme.example/news/a"));
    /// assert!(!pattern.matches("see https://acme.example/news/a"));
    /// ```
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            ConfigError::InvalidPattern(format!("'{}' does not compile: {}", pattern, e))
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if the URL matches from its first character
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Returns the pattern as configured
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
