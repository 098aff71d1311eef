//! Article body extraction
//!
//! The main text comes from the `readability` extractor. When it finds
//! nothing, the visible text of the page body stands in for it.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text never reaches the reader
const INVISIBLE: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// One line per text block, blank lines between blocks
fn tidy(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Extracts the main article text with readability scoring
///
/// `page_url` resolves relative links inside the article; a URL that does
/// not parse skips this step.
pub fn main_content(raw_html: &str, page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;

    match readability::extractor::extract(&mut raw_html.as_bytes(), &url) {
        Ok(product) => Some(tidy(&product.text)).filter(|text| !text.is_empty()),
        Err(e) => {
            tracing::debug!("Readability found no article in {}: {}", page_url, e);
            None
        }
    }
}

/// Everything a reader would see in the page body, scripts and styles excluded
pub fn visible_text(document: &Html) -> Option<String> {
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let pieces: Vec<&str> = root
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|el| INVISIBLE.contains(&el.value().name()));
                (!hidden).then_some(&**text)
            }
            _ => None,
        })
        .flat_map(str::split_whitespace)
        .collect();

    if pieces.is_empty() {
        None
    } else {
        Some(pieces.join(" "))
    }
}
