//! Article extraction
//!
//! Each field is recovered by an ordered list of strategies; the first one
//! producing a non-empty value wins and an exhausted list yields "".

use crate::crawler::content::{main_content, visible_text};
use crate::crawler::{FetchError, Fetcher};
use scraper::{Html, Selector};

/// Number of leading characters kept from a metadata date (`YYYY-MM-DD`)
const DATE_PREFIX_CHARS: usize = 10;

/// What an article page boils down to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    /// ISO-8601 date prefix, or empty when the page carries none
    pub date: String,
    pub content: String,
}

/// An article page as each strategy sees it
struct Page<'a> {
    url: &'a str,
    raw: &'a str,
    document: Html,
}

type Strategy = fn(&Page<'_>) -> Option<String>;

const CONTENT_STRATEGIES: [Strategy; 2] = [readable_text, body_text];

const DATE_STRATEGIES: [Strategy; 2] = [published_time, meta_date];

fn first_non_empty(page: &Page<'_>, strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .filter_map(|strategy| strategy(page))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
}

fn readable_text(page: &Page<'_>) -> Option<String> {
    main_content(page.raw, page.url)
}

fn body_text(page: &Page<'_>) -> Option<String> {
    visible_text(&page.document)
}

fn published_time(page: &Page<'_>) -> Option<String> {
    meta_content(&page.document, r#"meta[property="article:published_time"]"#)
}

fn meta_date(page: &Page<'_>) -> Option<String> {
    meta_content(&page.document, r#"meta[name="date"]"#)
}

fn title(document: &Html) -> String {
    Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|title| title.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default()
}

/// Extracts title, date and main text from an article page
///
/// `url` is the address the page was fetched from.
///
/// # Example
///
/// ```
/// use rival_watch::crawler::parse_article;
///
/// let html = r#"<html><head><title> Launch </title>
///   <meta name="date" content="2024-03-05T09:00:00Z"></head>
///   <body><p>Short body</p></body></html>"#;
/// let article = parse_article(html, "https://acme.example/news/launch");
/// assert_eq!(article.title, "Launch");
/// assert_eq!(article.date, "2024-03-05");
/// assert!(article.content.contains("Short body"));
/// ```
pub fn parse_article(html: &str, url: &str) -> ExtractedArticle {
    let page = Page {
        url,
        raw: html,
        document: Html::parse_document(html),
    };

    let date: String = first_non_empty(&page, &DATE_STRATEGIES)
        .chars()
        .take(DATE_PREFIX_CHARS)
        .collect();

    ExtractedArticle {
        title: title(&page.document),
        date,
        content: first_non_empty(&page, &CONTENT_STRATEGIES),
    }
}

/// Fetches an article page and extracts it
pub async fn extract_article(fetcher: &Fetcher, url: &str) -> Result<ExtractedArticle, FetchError> {
    let html = fetcher.fetch_text(url).await?;
    Ok(parse_article(&html, url))
}

/// Whether extracted text is long enough to keep
///
/// Length is counted in characters, not bytes.
pub fn passes_quality_gate(content: &str, min_chars: usize) -> bool {
    content.chars().count() >= min_chars
}
