use serde::Deserialize;

/// Main configuration structure for Rival-Watch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout applied to every individual fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Timeout for establishing a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Minimum time between two requests to the same host (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Maximum number of URLs collected from one sitemap tree
    #[serde(rename = "max-sitemap-urls")]
    pub max_sitemap_urls: usize,

    /// Number of sitemap levels walked below a candidate, counting the candidate
    #[serde(rename = "max-sitemap-depth")]
    pub max_sitemap_depth: usize,

    /// Articles with less extracted text than this are discarded
    #[serde(rename = "min-content-chars")]
    pub min_content_chars: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            politeness_delay_ms: 400,
            max_sitemap_urls: 5000,
            max_sitemap_depth: 5,
            min_content_chars: 200,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the user agent header sent with every request
    ///
    /// Format: `Mozilla/5.0 (compatible; Name/Version; +ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON file holding previously processed URLs
    #[serde(rename = "seen-path")]
    pub seen_path: String,

    /// Path to the CSV post dataset
    #[serde(rename = "posts-path")]
    pub posts_path: String,
}

/// A competitor site as written in the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    /// Competitor name, copied into every record
    pub name: String,

    /// Page listing the competitor's articles
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Prefix for root-relative links; defaults to the listing page origin
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Article URL pattern, matched from the start of the URL
    #[serde(rename = "include-url-regex")]
    pub include_url_regex: Option<String>,
}
