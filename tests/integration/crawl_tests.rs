//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, against on-disk stores in a temp dir.

use flate2::write::GzEncoder;
use flate2::Compression;
use rival_watch::config::{Config, CrawlerConfig, OutputConfig, SourceEntry, UserAgentConfig};
use rival_watch::crawler::{run_crawl, Coordinator, DiscoveryStrategy};
use rival_watch::storage::{CsvPostStore, JsonSeenStore, SeenStore, SeenUrls};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing into `dir`
fn create_test_config(sources: Vec<SourceEntry>, dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            request_timeout_secs: 1,
            connect_timeout_secs: 1,
            politeness_delay_ms: 0,
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        output: OutputConfig {
            seen_path: dir.join("seen_urls.json").display().to_string(),
            posts_path: dir.join("posts.csv").display().to_string(),
        },
        sources,
    }
}

/// A source whose articles live under `/{section}/`
fn source_entry(server: &MockServer, name: &str, section: &str) -> SourceEntry {
    let base = server.uri();
    SourceEntry {
        name: name.to_string(),
        listing_url: format!("{}/{}", base, section),
        base_url: Some(base.clone()),
        include_url_regex: Some(format!("^{}/{}/.*", regex::escape(&base), section)),
    }
}

/// An article page whose main text is well above the quality gate
fn long_article(title: &str) -> String {
    let paragraph = format!(
        "{} explains the launch in depth, with pricing for every tier, \
         quotes from early customers, and a roadmap for the coming year.",
        title
    );
    format!(
        r#"<html><head><title>{t}</title>
        <meta property="article:published_time" content="2024-05-14T08:30:00Z"></head>
        <body><nav><a href="/">Home</a></nav>
        <article><h2>{t}</h2><p>{p}</p><p>{p}</p></article></body></html>"#,
        t = title,
        p = paragraph
    )
}

/// An article page whose only text is `chars` letters
fn bare_article(chars: usize) -> String {
    format!("<html><body><span>{}</span></body></html>", "x".repeat(chars))
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// A coordinator over the config's on-disk stores
fn disk_coordinator(config: &Config) -> Coordinator<JsonSeenStore, CsvPostStore> {
    Coordinator::new(
        config,
        JsonSeenStore::new(&config.output.seen_path),
        CsvPostStore::new(&config.output.posts_path),
    )
    .unwrap()
}

fn read_seen_file(path: &str) -> Vec<String> {
    let content = std::fs::read_to_string(path).expect("seen file written");
    serde_json::from_str(&content).expect("seen file is a JSON array")
}

#[tokio::test]
async fn test_listing_scenario_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        "/news",
        r##"<html><body>
            <a href="/news/a">A</a>
            <a href="/news/b">B</a>
            <a href="/news/a#top">A again</a>
            <a href="/about">About</a>
        </body></html>"##
            .to_string(),
    )
    .await;
    mount_page(&server, "/news/a", long_article("Alpha")).await;
    mount_page(&server, "/news/b", long_article("Bravo")).await;

    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());
    let seen_path = config.output.seen_path.clone();
    let posts_path = config.output.posts_path.clone();

    let report = run_crawl(config).await.unwrap();

    assert_eq!(report.sources[0].strategy, DiscoveryStrategy::Listing);
    assert_eq!(report.sources[0].discovered, 2);
    assert_eq!(report.total_appended(), 2);

    let records = CsvPostStore::new(&posts_path).read_all().unwrap();
    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![format!("{}/news/a", base), format!("{}/news/b", base)]
    );

    let first = &records[0];
    assert_eq!(first.platform, "web");
    assert_eq!(first.competitor, "acme");
    assert_eq!(first.author, "");
    assert_eq!(first.date, "2024-05-14");
    assert_eq!((first.likes, first.comments, first.reposts), (0, 0, 0));
    assert!(first.content.contains("Alpha explains the launch"));
    assert!(!first.content.contains("Home"));

    assert_eq!(
        read_seen_file(&seen_path),
        vec![format!("{}/news/a", base), format!("{}/news/b", base)]
    );
}

#[tokio::test]
async fn test_empty_listing_falls_back_to_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/news", "<html><body>No anchors</body></html>".to_string()).await;
    mount_page(
        &server,
        "/sitemap.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{b}/news/one</loc></url>
  <url><loc>{b}/news/two</loc></url>
  <url><loc>{b}/about</loc></url>
  <url><loc>{b}/news/three</loc></url>
</urlset>"#,
            b = base
        ),
    )
    .await;
    for slug in ["one", "two", "three"] {
        mount_page(&server, &format!("/news/{}", slug), long_article(slug)).await;
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());
    let coordinator = disk_coordinator(&config);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.sources[0].strategy, DiscoveryStrategy::Sitemap);
    assert_eq!(report.sources[0].discovered, 3);
    assert_eq!(report.sources[0].appended, 3);
    assert_eq!(coordinator.post_sink().read_all().unwrap().len(), 3);
}

#[tokio::test]
async fn test_robots_declared_gzip_sitemap_index() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/blog", "<p>Nothing listed</p>".to_string()).await;
    mount_page(
        &server,
        "/robots.txt",
        format!("User-agent: *\nDisallow: /admin\nSITEMAP: {}/sitemap_index.xml\n", base),
    )
    .await;
    mount_page(
        &server,
        "/sitemap_index.xml",
        format!(
            r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{b}/pages.xml</loc></sitemap>
  <sitemap><loc>{b}/posts.xml.gz</loc></sitemap>
</sitemapindex>"#,
            b = base
        ),
    )
    .await;
    mount_page(
        &server,
        "/pages.xml",
        format!("<urlset><url><loc>{}/contact</loc></url></urlset>", base),
    )
    .await;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(
            format!(
                "<urlset><url><loc>{b}/blog/post-1</loc></url><url><loc>{b}/blog/post-2#comments</loc></url></urlset>",
                b = base
            )
            .as_bytes(),
        )
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/posts.xml.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(encoder.finish().unwrap()))
        .mount(&server)
        .await;
    mount_page(&server, "/blog/post-1", long_article("Post one")).await;
    mount_page(&server, "/blog/post-2", long_article("Post two")).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "blog")], dir.path());
    let coordinator = disk_coordinator(&config);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.sources[0].strategy, DiscoveryStrategy::Sitemap);
    let urls: Vec<String> = coordinator
        .post_sink()
        .read_all()
        .unwrap()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(
        urls,
        vec![format!("{}/blog/post-1", base), format!("{}/blog/post-2", base)]
    );
}

#[tokio::test]
async fn test_quality_gate_boundary() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/news",
        r#"<a href="/news/short">S</a><a href="/news/exact">E</a>"#.to_string(),
    )
    .await;
    mount_page(&server, "/news/short", bare_article(199)).await;
    mount_page(&server, "/news/exact", bare_article(200)).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());
    let coordinator = disk_coordinator(&config);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.sources[0].skipped_low_content, 1);
    assert_eq!(report.sources[0].appended, 1);

    let records = coordinator.post_sink().read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/news/exact", base));
    assert_eq!(records[0].content.chars().count(), 200);

    let seen = coordinator.seen_store().load().unwrap();
    assert!(seen.contains(&format!("{}/news/short", base)));
    assert!(seen.contains(&format!("{}/news/exact", base)));
}

#[tokio::test]
async fn test_seen_set_is_monotonic_across_runs() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());

    // First run: one article
    mount_page(&server, "/news", r#"<a href="/news/a">A</a>"#.to_string()).await;
    mount_page(&server, "/news/a", long_article("Alpha")).await;

    let first = run_crawl(config.clone()).await.unwrap();
    assert_eq!(first.total_appended(), 1);
    let rows_after_first = CsvPostStore::new(&config.output.posts_path)
        .read_all()
        .unwrap()
        .len();

    // Second run: the listing grows and the known article must not be fetched
    server.reset().await;
    mount_page(
        &server,
        "/news",
        r#"<a href="/news/b">B</a><a href="/news/a">A</a>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/news/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_article("Alpha")))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(&server, "/news/b", long_article("Bravo")).await;

    let second = run_crawl(config.clone()).await.unwrap();
    assert_eq!(second.sources[0].discovered, 2);
    assert_eq!(second.sources[0].new, 1);

    let records = CsvPostStore::new(&config.output.posts_path).read_all().unwrap();
    assert_eq!(rows_after_first, 1);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, format!("{}/news/a", base));

    // Third run: nothing new, nothing shrinks
    let third = run_crawl(config.clone()).await.unwrap();
    assert_eq!(third.total_appended(), 0);
    assert_eq!(
        CsvPostStore::new(&config.output.posts_path)
            .read_all()
            .unwrap()
            .len(),
        2
    );
    assert_eq!(read_seen_file(&config.output.seen_path).len(), 2);
}

#[tokio::test]
async fn test_failures_are_isolated() {
    let server = MockServer::start().await;
    let base = server.uri();

    // "alpha" cannot be discovered at all
    Mock::given(method("GET"))
        .and(path("/alpha"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // "beta" has one missing, one slow and one good article
    mount_page(
        &server,
        "/beta",
        r#"<a href="/beta/missing">M</a><a href="/beta/slow">S</a><a href="/beta/good">G</a>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/beta/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/beta/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(long_article("Slow"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/beta/good", long_article("Good")).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![
            source_entry(&server, "alpha", "alpha"),
            source_entry(&server, "beta", "beta"),
        ],
        dir.path(),
    );
    let coordinator = disk_coordinator(&config);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.sources.len(), 2);
    assert_eq!(report.sources[0].strategy, DiscoveryStrategy::None);
    assert_eq!(report.sources[1].failed, 2);
    assert_eq!(report.sources[1].appended, 1);

    let records = coordinator.post_sink().read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].competitor, "beta");

    // Failed URLs are marked seen too
    let seen = coordinator.seen_store().load().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.contains(&format!("{}/beta/slow", base)));
}

#[tokio::test]
async fn test_existing_dataset_rows_are_preserved() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());

    let existing = "platform,competitor,author,date,url,content,likes,comments,reposts\n\
                    linkedin,other,Jane,2023-01-01,https://old.example/1,\"Earlier, quoted\",4,1,0\n";
    std::fs::write(&config.output.posts_path, existing).unwrap();

    mount_page(&server, "/news", r#"<a href="/news/a">A</a>"#.to_string()).await;
    mount_page(&server, "/news/a", long_article("Alpha")).await;

    run_crawl(config.clone()).await.unwrap();

    let raw = std::fs::read_to_string(&config.output.posts_path).unwrap();
    assert!(raw.starts_with(existing));

    let records = CsvPostStore::new(&config.output.posts_path).read_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].competitor, "other");
    assert_eq!(records[0].likes, 4);
    assert_eq!(records[1].competitor, "acme");
}

#[tokio::test]
async fn test_existing_seen_file_is_respected() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());

    let store = JsonSeenStore::new(&config.output.seen_path);
    let seen: SeenUrls = [format!("{}/news/a", base)].into_iter().collect();
    store.save(&seen).unwrap();

    mount_page(&server, "/news", r#"<a href="/news/a">A</a>"#.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/news/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_article("Alpha")))
        .expect(0)
        .mount(&server)
        .await;

    let report = run_crawl(config.clone()).await.unwrap();

    assert_eq!(report.sources[0].new, 0);
    assert_eq!(store.load().unwrap().len(), 1);

    // The dataset is still initialized with its header
    let raw = std::fs::read_to_string(&config.output.posts_path).unwrap();
    assert_eq!(
        raw.trim_end(),
        "platform,competitor,author,date,url,content,likes,comments,reposts"
    );
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let server = MockServer::start().await;
    let user_agent = "Mozilla/5.0 (compatible; TestBot/1.0.0; +https://example.com/contact)";

    Mock::given(method("GET"))
        .and(path("/news"))
        .and(header("user-agent", user_agent))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/news/a">A</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/a"))
        .and(header("user-agent", user_agent))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_article("Alpha")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(vec![source_entry(&server, "acme", "news")], dir.path());
    let coordinator = disk_coordinator(&config);

    let report = coordinator.run().await.unwrap();
    assert_eq!(report.total_appended(), 1);
}
