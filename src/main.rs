//! Rival-Watch main entry point
//!
//! This is the command-line interface for the Rival-Watch competitor crawler.

use anyhow::Context;
use clap::Parser;
use rival_watch::config::{load_config, Config};
use rival_watch::crawler::run_crawl;
use rival_watch::storage::{CsvPostStore, JsonSeenStore, SeenStore};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rival-Watch: competitor content ingestion
///
/// Rival-Watch discovers new articles on configured competitor sites, through
/// their listing pages or their sitemaps, extracts the main text of each and
/// appends it to a CSV post dataset. URLs already processed are remembered
/// across runs and never fetched again.
#[derive(Parser, Debug)]
#[command(name = "rival-watch")]
#[command(version)]
#[command(about = "Competitor article crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "forget", "reset_seen"])]
    dry_run: bool,

    /// Show seen-set and dataset statistics and exit
    #[arg(long, conflicts_with_all = ["dry_run", "forget", "reset_seen"])]
    stats: bool,

    /// Remove URLs from the seen set so the next run retries them
    #[arg(long, value_name = "URL", num_args = 1.., conflicts_with_all = ["dry_run", "stats", "reset_seen"])]
    forget: Vec<String>,

    /// Clear the seen set entirely
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "forget"])]
    reset_seen: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded: {} source(s)", config.sources.len());

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else if !cli.forget.is_empty() {
        handle_forget(&config, &cli.forget)?;
    } else if cli.reset_seen {
        handle_reset_seen(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rival_watch=info,warn"),
            1 => EnvFilter::new("rival_watch=debug,info"),
            2 => EnvFilter::new("rival_watch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let sources = config.resolved_sources()?;

    println!("=== Rival-Watch Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Max sitemap URLs: {}", config.crawler.max_sitemap_urls);
    println!("  Max sitemap depth: {}", config.crawler.max_sitemap_depth);
    println!("  Min content chars: {}", config.crawler.min_content_chars);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Seen set: {}", config.output.seen_path);
    println!("  Posts: {}", config.output.posts_path);

    println!("\nSources ({}):", sources.len());
    for source in &sources {
        println!("  - {}", source.name);
        println!("    listing: {}", source.listing_url);
        println!("    base:    {}", source.base_url);
        println!("    include: {}", source.include.as_str());
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: seen-set size and rows per competitor
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let seen = JsonSeenStore::new(&config.output.seen_path)
        .load()
        .context("Failed to load seen set")?;

    println!("Seen set: {} ({} URLs)", config.output.seen_path, seen.len());

    let posts = CsvPostStore::new(&config.output.posts_path);
    if !posts.path().exists() {
        println!("Posts: {} (not created yet)", config.output.posts_path);
        return Ok(());
    }

    let records = posts.read_all().context("Failed to read post dataset")?;
    let mut per_competitor: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &records {
        *per_competitor.entry(record.competitor.as_str()).or_default() += 1;
    }

    println!("Posts: {} ({} rows)", config.output.posts_path, records.len());
    for (competitor, count) in per_competitor {
        println!("  {:<24} {}", competitor, count);
    }

    Ok(())
}

/// Handles the --forget mode: removes URLs from the seen set
fn handle_forget(config: &Config, urls: &[String]) -> anyhow::Result<()> {
    let store = JsonSeenStore::new(&config.output.seen_path);
    let mut seen = store.load().context("Failed to load seen set")?;

    for url in urls {
        if seen.remove(url) {
            println!("Forgot {}", url);
        } else {
            println!("Not in seen set: {}", url);
        }
    }

    store.save(&seen).context("Failed to save seen set")?;
    Ok(())
}

/// Handles the --reset-seen mode: clears the seen set
fn handle_reset_seen(config: &Config) -> anyhow::Result<()> {
    let store = JsonSeenStore::new(&config.output.seen_path);
    let mut seen = store.load().context("Failed to load seen set")?;
    let cleared = seen.len();
    seen.clear();
    store.save(&seen).context("Failed to save seen set")?;

    println!("Cleared {} URL(s) from {}", cleared, config.output.seen_path);
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let posts_path = config.output.posts_path.clone();
    let seen_path = config.output.seen_path.clone();

    let report = run_crawl(config).await.context("Crawl failed")?;

    for source in &report.sources {
        tracing::info!(
            source = %source.name,
            "{}: {} discovered via {}, {} new, {} appended, {} low content, {} failed",
            source.name,
            source.discovered,
            source.strategy,
            source.new,
            source.appended,
            source.skipped_low_content,
            source.failed
        );
    }

    println!("OK: new items appended: {}", report.total_appended());
    println!("OK: posts stored at {}", posts_path);
    println!("OK: seen URLs stored at {}", seen_path);

    Ok(())
}
