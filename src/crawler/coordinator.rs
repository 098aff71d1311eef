//! Crawler coordinator - main crawl orchestration logic
//!
//! Sources are processed one after another. For each source:
//! - discover candidate links (listing page, then sitemaps)
//! - drop links already in the seen set
//! - extract every new article, isolating failures to the single URL
//! - append the accepted records to the post dataset in one operation
//!
//! Every processed URL is marked seen, whether it was accepted, too thin, or
//! failed outright; `--forget` and `--reset-seen` undo that manually. The seen
//! set is written back exactly once, after the last source.

use crate::config::{Config, CrawlerConfig, Source};
use crate::crawler::article::{extract_article, passes_quality_gate};
use crate::crawler::discovery::{discover_links, DiscoveryStrategy};
use crate::crawler::Fetcher;
use crate::sitemap::SitemapResolver;
use crate::storage::{
    ArticleRecord, CsvPostStore, JsonSeenStore, PostSink, SeenStore, SeenUrls, StorageError,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of crawling one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub strategy: DiscoveryStrategy,
    /// Candidate links found by discovery
    pub discovered: usize,
    /// Candidates not in the seen set
    pub new: usize,
    /// Records appended to the dataset
    pub appended: usize,
    pub skipped_low_content: usize,
    pub failed: usize,
}

impl SourceReport {
    fn new(name: &str, strategy: DiscoveryStrategy, discovered: usize, new: usize) -> Self {
        Self {
            name: name.to_string(),
            strategy,
            discovered,
            new,
            appended: 0,
            skipped_low_content: 0,
            failed: 0,
        }
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
}

impl CrawlReport {
    pub fn total_appended(&self) -> usize {
        self.sources.iter().map(|s| s.appended).sum()
    }

    pub fn total_new(&self) -> usize {
        self.sources.iter().map(|s| s.new).sum()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Main crawler coordinator structure
///
/// Generic over its two persistence boundaries so tests can drive it with
/// the in-memory stores.
pub struct Coordinator<S: SeenStore, P: PostSink> {
    sources: Vec<Source>,
    fetcher: Fetcher,
    resolver: SitemapResolver,
    min_content_chars: usize,
    seen_store: S,
    sink: P,
}

impl<S: SeenStore, P: PostSink> Coordinator<S, P> {
    /// Creates a coordinator from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(RivalError)` - A source failed to resolve or the HTTP client
    ///   could not be built
    pub fn new(config: &Config, seen_store: S, sink: P) -> crate::Result<Self> {
        let sources = config.resolved_sources()?;
        let fetcher = Fetcher::new(&config.crawler, &config.user_agent)?;
        Ok(Self::with_fetcher(
            sources,
            fetcher,
            &config.crawler,
            seen_store,
            sink,
        ))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(
        sources: Vec<Source>,
        fetcher: Fetcher,
        crawler: &CrawlerConfig,
        seen_store: S,
        sink: P,
    ) -> Self {
        Self {
            sources,
            fetcher,
            resolver: SitemapResolver::from_config(crawler),
            min_content_chars: crawler.min_content_chars,
            seen_store,
            sink,
        }
    }

    pub fn seen_store(&self) -> &S {
        &self.seen_store
    }

    pub fn post_sink(&self) -> &P {
        &self.sink
    }

    /// Runs the crawl over every source
    ///
    /// Only persistence failures abort the run. A failure while appending a
    /// source's records leaves earlier sources' rows in place but skips the
    /// final seen-set write.
    pub async fn run(&self) -> crate::Result<CrawlReport> {
        let started_at = Utc::now();
        tracing::info!("Starting crawl of {} source(s)", self.sources.len());

        let mut seen = self.seen_store.load()?;
        tracing::debug!("Loaded {} seen URLs", seen.len());
        self.sink.ensure_initialized()?;

        let mut reports = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            reports.push(self.crawl_source(source, &mut seen).await?);
        }

        self.seen_store.save(&seen)?;

        let report = CrawlReport {
            started_at,
            finished_at: Utc::now(),
            sources: reports,
        };

        tracing::info!(
            "Crawl completed: {} new item(s) appended in {}s, {} URLs in seen set",
            report.total_appended(),
            report.elapsed().num_seconds(),
            seen.len()
        );

        Ok(report)
    }

    /// Processes a single source
    async fn crawl_source(
        &self,
        source: &Source,
        seen: &mut SeenUrls,
    ) -> Result<SourceReport, StorageError> {
        tracing::info!(source = %source.name, "Fetching listing {}", source.listing_url);

        let outcome = discover_links(&self.fetcher, &self.resolver, source).await;
        let new_links: Vec<&String> = outcome
            .links
            .iter()
            .filter(|url| !seen.contains(url))
            .collect();

        tracing::info!(
            source = %source.name,
            "New links this run: {} of {}",
            new_links.len(),
            outcome.links.len()
        );

        let mut report = SourceReport::new(
            &source.name,
            outcome.strategy,
            outcome.links.len(),
            new_links.len(),
        );
        let mut records: Vec<ArticleRecord> = Vec::new();

        for url in new_links {
            match extract_article(&self.fetcher, url).await {
                Ok(article) if passes_quality_gate(&article.content, self.min_content_chars) => {
                    tracing::debug!(source = %source.name, url = %url, "Accepted \"{}\"", article.title);
                    records.push(ArticleRecord::web(
                        &source.name,
                        url,
                        &article.date,
                        &article.content,
                    ));
                }
                Ok(article) => {
                    tracing::info!(
                        source = %source.name,
                        url = %url,
                        "Low content extracted ({} chars), skipping",
                        article.content.chars().count()
                    );
                    report.skipped_low_content += 1;
                }
                Err(e) => {
                    tracing::warn!(source = %source.name, url = %url, "Failed article: {}", e);
                    report.failed += 1;
                }
            }
            seen.insert(url.as_str());
        }

        self.sink.append(&records)?;
        report.appended = records.len();

        tracing::info!(
            source = %source.name,
            "Appended {} record(s), {} low content, {} failed",
            report.appended,
            report.skipped_low_content,
            report.failed
        );

        Ok(report)
    }
}

/// Runs a complete crawl against the configured on-disk stores
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every source was processed
/// * `Err(RivalError)` - The run was aborted at the persistence boundary
pub async fn run_crawl(config: Config) -> crate::Result<CrawlReport> {
    let seen_store = JsonSeenStore::new(&config.output.seen_path);
    let sink = CsvPostStore::new(&config.output.posts_path);

    let coordinator = Coordinator::new(&config, seen_store, sink)?;
    coordinator.run().await
}
